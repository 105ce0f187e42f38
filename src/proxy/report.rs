//! Output of working proxies to a file or the console

use crate::proxy::models::CheckResult;
use crate::Result;
use std::fs;
use std::path::Path;

/// Format a single result as an output line.
///
/// Results with a recorded latency print as `host:port | <latency>ms`,
/// results without one print the bare address.
pub fn format_line(result: &CheckResult) -> String {
    match result.latency_ms {
        Some(ms) => format!("{} | {}ms", result.candidate, ms),
        None => result.candidate.to_string(),
    }
}

/// Write results to a flat text file, one per line.
///
/// Overwrites any existing file at the path.
pub fn save_to_file<P: AsRef<Path>>(results: &[CheckResult], path: P) -> Result<()> {
    let mut content = results
        .iter()
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    fs::write(path, content)?;
    Ok(())
}

/// Print results to stdout, one per line
pub fn print_to_console(results: &[CheckResult]) {
    for result in results {
        println!("{}", format_line(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::models::ProxyCandidate;

    fn working(addr: &str, ms: u64) -> CheckResult {
        CheckResult::working(ProxyCandidate::parse(addr).unwrap(), ms)
    }

    #[test]
    fn test_format_line_with_latency() {
        let result = working("1.1.1.1:80", 123);
        assert_eq!(format_line(&result), "1.1.1.1:80 | 123ms");
    }

    #[test]
    fn test_format_line_without_latency() {
        let result = CheckResult::timeout(ProxyCandidate::parse("1.1.1.1:80").unwrap());
        assert_eq!(format_line(&result), "1.1.1.1:80");
    }

    #[test]
    fn test_save_to_file() {
        let dir = std::env::temp_dir().join("proxy_sweep_report_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("working.txt");

        let results = vec![working("1.1.1.1:80", 10), working("2.2.2.2:80", 20)];
        save_to_file(&results, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1.1.1.1:80 | 10ms\n2.2.2.2:80 | 20ms\n");

        // A later run with fewer results overwrites the file entirely
        save_to_file(&[working("3.3.3.3:80", 30)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "3.3.3.3:80 | 30ms\n");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_empty_results() {
        let dir = std::env::temp_dir().join("proxy_sweep_report_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.txt");

        save_to_file(&[], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        std::fs::remove_file(&path).ok();
    }
}
