use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid page, expected positive integer".to_string());
        }
    }
    if let Some(row) = args.select {
        if row == 0 {
            return Err("invalid select, rows are numbered from 1".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive number of seconds".to_string());
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text or json"
            ));
        }
    }
    if args.output_format.is_some() && args.output.is_none() {
        return Err("--output-format requires --output".to_string());
    }
    if args.interactive && args.select.is_some() {
        return Err("use either --interactive or --select, not both".to_string());
    }
    if let Some(data) = args.data.as_deref() {
        if data.trim().is_empty() {
            return Err("invalid --data, expected a file path or URL".to_string());
        }
    }
    Ok(())
}
