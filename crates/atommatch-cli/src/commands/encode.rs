use crate::cli::EncodeArgs;
use crate::error::{CliError, Result};
use atommatch::core::config::MatcherConfig;
use atommatch::core::io::codec;
use std::io::Write;
use tracing::info;

pub fn run(args: EncodeArgs, out: &mut impl Write) -> Result<()> {
    let matcher = MatcherConfig::load(&args.config)?.into_matcher()?;
    let bytes = codec::encode(&matcher).map_err(|source| CliError::Encode {
        matcher: matcher.to_string(),
        source,
    })?;
    std::fs::write(&args.output, &bytes)?;

    info!(
        "Encoded {} into {} bytes at {:?}.",
        matcher,
        bytes.len(),
        args.output
    );
    writeln!(
        out,
        "Wrote {} ({} bytes) to {}",
        matcher,
        bytes.len(),
        args.output.display()
    )?;
    Ok(())
}
