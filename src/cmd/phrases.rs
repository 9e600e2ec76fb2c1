use crate::data::{AppSettings, SpeechSettings};
use anyhow::Result;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    write_phrases(&settings.speech, &mut std::io::stdout())
}

pub(crate) fn write_phrases<W: std::io::Write>(speech: &SpeechSettings, out: &mut W) -> Result<()> {
    writeln!(out, "Phrases ({})", speech.language)?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<4} {:<12} {}", "#", "Label", "Text")?;
    for (i, p) in speech.phrases.iter().enumerate() {
        writeln!(out, "  {:<4} {:<12} {}", i + 1, p.label, p.text)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} phrase(s)", speech.phrases.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(speech: &SpeechSettings) -> String {
        let mut buf = Vec::new();
        write_phrases(speech, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_phrases_defaults() {
        let out = render(&SpeechSettings::default());
        assert!(out.starts_with("Phrases (ko)"));
        assert!(out.contains("1    Toilet       화장실 가고 싶어요"));
        assert!(out.contains("Hungry"));
        assert!(out.contains("Total: 3 phrase(s)"));
    }

    #[test]
    fn test_write_phrases_empty() {
        let speech = SpeechSettings {
            phrases: vec![],
            ..SpeechSettings::default()
        };
        let out = render(&speech);
        assert!(out.contains("Total: 0 phrase(s)"));
    }
}
