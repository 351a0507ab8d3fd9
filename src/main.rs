use clap::Parser;
use itoa::Buffer;
use numgen::cli::Cli;
use numgen::report;
use numgen::Picker;
use std::io::{self, BufWriter, Write};

fn main() {
    let cli = Cli::parse();

    eprintln!(
        "Picking {} numbers from [{}, {}]",
        cli.count, cli.start, cli.end
    );

    let mut picker = match Picker::with_segment_count(cli.start, cli.end, cli.segments) {
        Ok(picker) => picker,
        Err(e) => {
            eprintln!("Setup failed: {e}");
            std::process::exit(1);
        }
    };

    if cli.verbose {
        if let Some((lo, hi)) = picker.pool_extremes() {
            eprintln!(
                "Pool ready: {} survivors, {} gaps, extremes [{}, {}]",
                picker.survivor_count(),
                picker.excluded_count(),
                lo,
                hi
            );
        }
    }

    const BUFFER_SIZE: usize = 1024 * 1024; // 1MB
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, io::stdout());

    // Reusable buffers for formatting lines
    let mut msg_buf = String::with_capacity(64);
    let mut itoa_buf = Buffer::new();

    let size = (cli.end - cli.start + 1) as u64;
    let region_size = (size / 10).max(1);
    let mut region_counts = [0u64; 10];
    let mut min = i64::MAX;
    let mut max = i64::MIN;
    let mut sum: i128 = 0;

    for seq in 0..cli.count {
        let value = match picker.pick() {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Pick {seq} failed: {e}");
                std::process::exit(1);
            }
        };

        report::write_pick(cli.compact, &mut msg_buf, &mut itoa_buf, seq, value);
        writer.write_all(msg_buf.as_bytes()).expect("Write failed");

        let region = ((value - cli.start) as u64 / region_size).min(9);
        region_counts[region as usize] += 1;
        min = min.min(value);
        max = max.max(value);
        sum += i128::from(value);

        if seq > 0 && seq % 100_000 == 0 {
            eprintln!("  Produced {} picks...", seq);
        }
    }

    if cli.stats && cli.count > 0 {
        writer
            .write_all(b"Distribution:\n")
            .expect("Write failed");
        for (idx, &count) in region_counts.iter().enumerate() {
            let lo = cli.start + (idx as u64 * region_size) as i64;
            if lo > cli.end {
                break;
            }
            let hi = (lo + region_size as i64 - 1).min(cli.end);
            report::write_region_row(&mut msg_buf, &mut itoa_buf, lo, hi, count, cli.count);
            writer.write_all(msg_buf.as_bytes()).expect("Write failed");
        }

        let mean_tenths = (sum * 10 / i128::from(cli.count)) as i64;
        report::write_summary(&mut msg_buf, &mut itoa_buf, cli.count, min, max, mean_tenths);
        writer.write_all(msg_buf.as_bytes()).expect("Write failed");
    }

    writer.flush().expect("Flush failed");
    eprintln!("Done! ({} total picks)", cli.count);
}
