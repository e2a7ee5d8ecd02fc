pub fn describe_bitrate(bitrate: Option<i64>) -> String {
    match bitrate {
        Some(bps) => format!("{} bps", bps),
        None => "unknown".to_string(),
    }
}

/// Parses a human bitrate such as `8M`, `4800k`, `5.5mbps` or `2_500_000` into
/// bits per second. Multipliers are decimal.
pub fn parse_bitrate(input: &str) -> Result<i64, String> {
    let compact: String = input
        .chars()
        .filter(|ch| !(ch.is_whitespace() || *ch == '_' || *ch == ','))
        .collect::<String>()
        .to_ascii_lowercase();
    if compact.is_empty() {
        return Err("Bitrate value cannot be empty".to_string());
    }

    let unit_start = compact
        .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
        .unwrap_or(compact.len());
    let (number, unit) = compact.split_at(unit_start);
    if number.is_empty() {
        return Err(format!("Failed to parse bitrate '{}': missing number", input));
    }
    let value: f64 = number
        .parse()
        .map_err(|_| format!("Failed to parse bitrate '{}': invalid number", input))?;

    // "kbit/s", "kbps", "kb" and "k" all name the same scale.
    let unit = unit.strip_suffix("/s").unwrap_or(unit);
    let scale = ["bps", "bits", "bit", "b"]
        .iter()
        .find_map(|bits| unit.strip_suffix(*bits))
        .unwrap_or(unit);
    let multiplier = match scale {
        "" => 1i64,
        "k" => 1_000,
        "m" => 1_000_000,
        "g" => 1_000_000_000,
        other => {
            return Err(format!(
                "Failed to parse bitrate '{}': unsupported suffix '{}'. Use plain numbers or k/m/g suffixes.",
                input, other
            ));
        }
    };

    let bits_per_second = (value * multiplier as f64).round() as i64;
    if bits_per_second <= 0 {
        return Err(format!("Failed to parse bitrate '{}': value must be positive", input));
    }

    Ok(bits_per_second)
}

/// Like [`parse_bitrate`], but `0` is accepted and means the bitrate is unknown.
pub fn parse_original_bitrate(input: &str) -> Result<i64, String> {
    if input.trim() == "0" {
        return Ok(0);
    }
    parse_bitrate(input)
}
