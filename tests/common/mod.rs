#![allow(dead_code)]

use rand::Rng;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const OPERATIONS_HEADER: &str = "op, order, payment, amount, kind, details";
pub const ORDERS_HEADER: &str = "id, amount";
pub const REPORT_HEADER: &str = "order,amount,status,cashed_debt,remaining_debt,charges,is_paid";

const KINDS: [&str; 4] = ["CreditCard", "CashSlip", "Cash", "Voucher"];

pub fn orders_file(orders: &[(u64, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{ORDERS_HEADER}").unwrap();
    for (id, amount) in orders {
        writeln!(file, "{id}, {amount}").unwrap();
    }
    file
}

pub fn operations_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{OPERATIONS_HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

/// Writes `orders` orders of amount 100 to `path`, ids 1..=orders.
pub fn generate_orders(path: &Path, orders: u64) -> Result<(), Error> {
    let mut file = File::create(path)?;
    writeln!(file, "{ORDERS_HEADER}")?;
    for id in 1..=orders {
        writeln!(file, "{id}, 100")?;
    }
    Ok(())
}

/// Writes a random mix of payment requests and outcomes against orders 1..=orders.
///
/// Outcomes reference payments that were requested earlier in the file,
/// assuming every request is accepted, so some refer to ids that were never
/// created. Both cases are part of the workload.
pub fn generate_operations(path: &Path, orders: u64, rows: usize) -> Result<(), Error> {
    let mut rng = rand::thread_rng();
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(["op", "order", "payment", "amount", "kind", "details"])?;

    let mut requested: u64 = 0;
    for _ in 0..rows {
        if requested == 0 || rng.gen_bool(0.5) {
            let order = rng.gen_range(1..=orders).to_string();
            let amount = format!("{}.{:02}", rng.gen_range(1..=60), rng.gen_range(0..100));
            let kind = KINDS[rng.gen_range(0..KINDS.len())];
            wtr.write_record(["create", &order, "", &amount, kind, ""])?;
            requested += 1;
        } else {
            let payment = rng.gen_range(1..=requested).to_string();
            let outcome = if rng.gen_bool(0.7) { "Success" } else { "Failure" };
            wtr.write_record(["process", "", &payment, "", outcome, "generated"])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Parses the report into `(order, amount, status, cashed, remaining, charges, is_paid)` rows.
pub fn parse_report(stdout: &str) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_reader(stdout.as_bytes());
    reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}
