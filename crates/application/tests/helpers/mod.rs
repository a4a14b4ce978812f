pub mod mock_stats;
