//! Credential file loading.

use std::path::Path;

use anyhow::{Context, Result, bail};
use fitbook::Credentials;

/// Reads a two-line credentials file: email on the first line, password on
/// the second. Surrounding whitespace is trimmed; nothing else is validated.
pub fn load(path: &Path) -> Result<Credentials> {
	let raw = std::fs::read_to_string(path)
		.with_context(|| format!("reading credentials file {}", path.display()))?;
	let mut lines = raw.lines().map(str::trim);

	let email = match lines.next() {
		Some(line) if !line.is_empty() => line.to_string(),
		_ => bail!("credentials file {} is missing the email line", path.display()),
	};
	let password = match lines.next() {
		Some(line) if !line.is_empty() => line.to_string(),
		_ => bail!("credentials file {} is missing the password line", path.display()),
	};

	Ok(Credentials { email, password })
}
