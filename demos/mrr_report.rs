use chrono::NaiveDate;
use mrr_analytics::*;

const SAMPLE_LEDGER: &str = "\
customer_id,period_start,period_end,paid_plan,paid_amount
1,2021-10-01,2021-10-31,monthly,100
1,2021-11-01,2021-11-30,monthly,100
1,2022-01-01,2022-01-31,monthly,100
1,2022-02-01,2022-02-28,monthly,120
1,2022-03-01,2022-03-31,monthly,100
2,2021-09-01,2022-08-31,annually,600
3,2021-11-01,2021-11-30,monthly,40
3,2021-12-01,2021-12-31,monthly,40
";

fn load_ledger(user_id: &str, file_id: &str) -> anyhow::Result<Vec<Invoice>> {
    let mut reader = csv::Reader::from_reader(SAMPLE_LEDGER.as_bytes());
    let mut invoices = Vec::new();

    for record in reader.records() {
        let record = record?;
        invoices.push(Invoice {
            user_id: user_id.to_string(),
            file_id: file_id.to_string(),
            customer_id: record[0].parse()?,
            period_start: NaiveDate::parse_from_str(&record[1], DATE_FORMAT)?,
            period_end: NaiveDate::parse_from_str(&record[2], DATE_FORMAT)?,
            paid_plan: match &record[3] {
                "annually" => PaidPlan::Annually,
                _ => PaidPlan::Monthly,
            },
            paid_amount: record[4].parse()?,
        });
    }

    Ok(invoices)
}

fn main() -> anyhow::Result<()> {
    println!("📊 MRR Movement Report\n");

    let storage = InMemoryInvoiceStore::new();
    storage.add_invoices(load_ledger("demo", "ledger.csv")?)?;

    let engine = AnalyticsEngine::new(storage, InMemoryMrrCache::new());
    let (months, mrr) = engine.compute_analytics("demo", "ledger.csv", "2021-10-01", "2022-03-31")?;

    println!(
        "{:<14}{:>10}{:>10}{:>10}{:>10}{:>12}{:>10}{:>10}",
        "Month", "New", "Old", "React", "Expand", "Contract", "Churn", "Total"
    );
    for (i, month) in months.iter().enumerate() {
        println!(
            "{:<14}{:>10}{:>10}{:>10}{:>10}{:>12}{:>10}{:>10}",
            month,
            mrr.new[i],
            mrr.old[i],
            mrr.reactivation[i],
            mrr.expansion[i],
            mrr.contraction[i],
            mrr.churn[i],
            mrr.total[i],
        );
    }

    // The same window is now served from the cache.
    let (_, cached) = engine.compute_analytics("demo", "ledger.csv", "2021-10-01", "2022-03-31")?;
    assert_eq!(cached, mrr);
    println!("\n✅ Recomputed window served from cache");

    Ok(())
}
