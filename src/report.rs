//! Reporter
//!
//! Console output for a run: the configuration up front, the totals at the end.

use crate::config::RunConfig;
use crate::workload::AggregateResult;

/// Format an integer with `,` between groups of three digits
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_config(config: &RunConfig) -> String {
    let mut lines = vec![
        format!("Server        : {}", config.server_addr()),
        format!("Clients       : {}", config.clients),
        format!("Ops/client    : {}", config.ops_per_client),
        format!("Total ops     : {}", group_thousands(config.total_ops())),
        format!("Mode          : {}", config.mode),
        format!("Key pool      : {}", group_thousands(config.key_pool)),
    ];
    if config.io_timeout_ms > 0 {
        lines.push(format!("I/O timeout   : {}ms", config.io_timeout_ms));
    }
    lines.push("---".to_string());
    lines.join("\n")
}

pub fn format_results(result: &AggregateResult) -> String {
    [
        format!("=== {} RESULTS ===", result.mode),
        format!(
            "Completed ops : {} / {}",
            group_thousands(result.completed),
            group_thousands(result.total_ops)
        ),
        format!("Errors        : {}", group_thousands(result.errors)),
        format!("Elapsed       : {:.3}s", result.elapsed.as_secs_f64()),
        format!(
            "Ops/sec       : {}",
            group_thousands(result.ops_per_sec().round() as u64)
        ),
    ]
    .join("\n")
}

/// Print the configuration block
pub fn print_config(config: &RunConfig) {
    println!("{}", format_config(config));
}

/// Print the results block
pub fn print_results(result: &AggregateResult) {
    println!("{}", format_results(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use std::time::Duration;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn test_format_config() {
        let config = RunConfig::builder().host("10.0.0.2").build().unwrap();
        let text = format_config(&config);

        assert!(text.contains("Server        : 10.0.0.2:8080"));
        assert!(text.contains("Clients       : 50"));
        assert!(text.contains("Ops/client    : 2000"));
        assert!(text.contains("Total ops     : 100,000"));
        assert!(text.contains("Mode          : MIXED"));
        assert!(text.contains("Key pool      : 1,000,000"));
        assert!(!text.contains("I/O timeout"));
        assert!(text.ends_with("---"));
    }

    #[test]
    fn test_format_results() {
        let result = AggregateResult {
            mode: Mode::Set,
            total_ops: 100_000,
            completed: 99_999,
            errors: 1,
            elapsed: Duration::from_millis(2500),
        };
        let text = format_results(&result);

        assert!(text.starts_with("=== SET RESULTS ==="));
        assert!(text.contains("Completed ops : 99,999 / 100,000"));
        assert!(text.contains("Errors        : 1"));
        assert!(text.contains("Elapsed       : 2.500s"));
        assert!(text.contains("Ops/sec       : 40,000"));
    }

    #[test]
    fn test_format_results_all_failed() {
        let result = AggregateResult {
            mode: Mode::Mixed,
            total_ops: 100,
            completed: 0,
            errors: 10,
            elapsed: Duration::ZERO,
        };
        let text = format_results(&result);

        assert!(text.contains("Completed ops : 0 / 100"));
        assert!(text.contains("Errors        : 10"));
        assert!(text.contains("Ops/sec       : 0"));
    }
}
