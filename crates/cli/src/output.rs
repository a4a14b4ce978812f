use tierdns_application::use_cases::CacheStatsReport;
use tierdns_domain::{DnsAnswer, RecordType};
use tierdns_infrastructure::dns::{CachedAnswer, ResolveFailure};

pub fn print_result(
    round: u32,
    host: &str,
    record_type: RecordType,
    result: &Result<CachedAnswer, ResolveFailure>,
) {
    match result {
        Ok(cached) => {
            let status = if cached.stale { "stale" } else { "fresh" };
            println!(
                "#{} {} {} {} from {} rcode={}",
                round,
                host,
                record_type,
                status,
                cached.source.as_str(),
                cached.answer.rcode
            );
            print_records(&cached.answer);
        }
        Err(failure) => match &failure.stale {
            Some(stale) => {
                println!(
                    "#{} {} {} error+stale ({}) from {}",
                    round,
                    host,
                    record_type,
                    failure.error,
                    stale.source.as_str()
                );
                print_records(&stale.answer);
            }
            None => {
                println!("#{} {} {} error ({})", round, host, record_type, failure.error);
            }
        },
    }
}

fn print_records(answer: &DnsAnswer) {
    for record in &answer.records {
        println!("    {}", record);
    }
}

pub fn print_stats(report: &CacheStatsReport) {
    let s = &report.snapshot;

    println!();
    println!("cache:");
    if let Some(entries) = s.fast_tier_entries {
        println!("  fast tier entries    {}", entries);
    }
    println!("  hit rate             {}", report.hit_rate);
    println!("  served from cache    {}", report.served_from_cache);
    println!("  fresh / stale hits   {} / {}", s.fresh_hits, s.stale_hits);
    println!("  negative hits        {}", s.negative_hits);
    println!("  misses               {}", s.misses);
    println!("  upstream queries     {} ({} failed)", s.upstream_queries, s.upstream_failures);
    println!("  stale fallbacks      {}", s.stale_fallbacks);
    println!("  insertions           {} (skipped zero ttl: {})", s.insertions, s.skipped_zero_ttl);
    println!("  promotions           {}", s.promotions);
    println!(
        "  repopulations        {} started, {} deduplicated, {} failed",
        s.repopulations_started, s.repopulations_deduplicated, s.repopulation_failures
    );
    if s.tier_read_errors + s.tier_write_errors + s.decode_errors > 0 {
        println!(
            "  tier errors          read {} / write {} / decode {}",
            s.tier_read_errors, s.tier_write_errors, s.decode_errors
        );
    }
}
