use crate::cli::{InspectArgs, OutputFormat};
use crate::error::{CliError, Result};
use atommatch::core::config::MatcherConfig;
use atommatch::core::io::codec;
use std::io::Write;
use tracing::debug;

pub fn run(args: InspectArgs, out: &mut impl Write) -> Result<()> {
    let data = std::fs::read(&args.input)?;
    let matcher = codec::decode(&data).map_err(|source| CliError::Decode {
        path: args.input.clone(),
        source,
    })?;
    debug!("Decoded {} from {} bytes.", matcher.type_name(), data.len());

    match args.format {
        OutputFormat::Text => writeln!(out, "{}", matcher)?,
        OutputFormat::Toml => write!(
            out,
            "{}",
            MatcherConfig::from_matcher(&matcher).to_toml_string()?
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atommatch::core::io::stream::CodecError;
    use atommatch::matching::id_list::IdListMatcher;
    use atommatch::matching::matcher::AtomMatcher;
    use atommatch::matching::mcs::McsMatcher;
    use atommatch::matching::name::NameMatcher;
    use std::path::Path;
    use tempfile::tempdir;

    fn inspect(path: &Path, format: OutputFormat) -> Result<String> {
        let mut out = Vec::new();
        run(
            InspectArgs {
                input: path.to_path_buf(),
                format,
            },
            &mut out,
        )?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_the_matcher_description() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.bin");
        let matcher: AtomMatcher = McsMatcher::new().with_prematcher(NameMatcher).into();
        std::fs::write(&path, codec::encode(&matcher).unwrap()).unwrap();

        assert_eq!(
            inspect(&path, OutputFormat::Text).unwrap(),
            "McsMatcher( prematcher = NameMatcher(), timeout = 1 s, match_light_atoms = false )\n"
        );
    }

    #[test]
    fn toml_output_rebuilds_the_same_matcher() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.bin");
        let matcher: AtomMatcher = IdListMatcher::from_name_pairs([("C1", "CA")]).into();
        std::fs::write(&path, codec::encode(&matcher).unwrap()).unwrap();

        let text = inspect(&path, OutputFormat::Toml).unwrap();
        let rebuilt = MatcherConfig::from_toml_str(&text)
            .unwrap()
            .into_matcher()
            .unwrap();
        assert_eq!(rebuilt, matcher);
    }

    #[test]
    fn corrupt_files_name_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.bin");
        std::fs::write(&path, [0u8, 0, 0]).unwrap();

        let err = inspect(&path, OutputFormat::Text).unwrap_err();
        assert!(matches!(
            err,
            CliError::Decode {
                source: CodecError::UnexpectedEof { .. },
                ..
            }
        ));
        assert!(err.to_string().contains("corrupt.bin"));
    }
}
