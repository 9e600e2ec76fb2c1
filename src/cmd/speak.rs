use crate::data::{AppSettings, Phrase};
use crate::speech::{CommandSpeaker, Speaker};
use anyhow::{bail, Result};

pub fn run(index: usize) -> Result<()> {
    let settings = AppSettings::load()?;
    let mut speaker = CommandSpeaker::from_settings(&settings.speech);
    let phrase = speak_phrase(&settings, index, &mut speaker)?;
    println!("Speaking: {} ({})", phrase.label, phrase.text);
    Ok(())
}

/// Speaks the 1-based `index`th phrase and returns it.
pub(crate) fn speak_phrase<'a>(
    settings: &'a AppSettings,
    index: usize,
    speaker: &mut dyn Speaker,
) -> Result<&'a Phrase> {
    let phrases = &settings.speech.phrases;
    let Some(phrase) = index.checked_sub(1).and_then(|i| phrases.get(i)) else {
        bail!(
            "no phrase #{index}; choose 1-{} (see `antibarrier phrases`)",
            phrases.len()
        );
    };
    speaker.speak(&phrase.text, &settings.speech.language)?;
    Ok(phrase)
}
