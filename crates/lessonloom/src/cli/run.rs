//! Command dispatch.

use super::io::{read_image, read_page, write_blob};
use super::{Cli, Commands};
use lessonloom_core::{MediaBlob, Session, VerifiedSource};
use lessonloom_pipeline::Pipeline;
use std::path::Path;
use tracing::{info, instrument, warn};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Run one CLI command against `pipeline`.
#[instrument(skip_all)]
pub async fn run_command(cli: Cli, pipeline: &Pipeline, session: &Session) -> CommandResult {
    let out_dir = cli.out_dir.as_path();

    match cli.command {
        Commands::Analyze { image } => {
            let image = read_image(&image)?;
            let outcome = pipeline.analyze_page(session, &image).await?;
            if let Some(reason) = outcome.fallback_reason() {
                warn!(reason, "Analysis fell back to the default value");
            }
            println!("{}", serde_json::to_string_pretty(outcome.value())?);
        }

        Commands::Roadmap { context, images } => {
            let pages = images
                .iter()
                .map(|path| read_image(path))
                .collect::<Result<Vec<_>, _>>()?;
            let roadmap = pipeline.generate_roadmap(session, &context, &pages).await?;
            println!("{}", roadmap);
        }

        Commands::Script { page } => {
            let source = source_from(&page)?;
            println!("{}", pipeline.teacher_script(session, &source).await?);
        }

        Commands::Speak { text, page, voice } => {
            let (text, page_voice) = match (text, page) {
                (Some(text), _) => (text, None),
                (None, Some(path)) => {
                    let page = read_page(&path)?;
                    (page.teacher_script, Some(page.teacher_voice))
                }
                (None, None) => return Err("speak needs --text or --page".into()),
            };
            let voice = choose_voice(voice, page_voice);
            let blob = pipeline
                .synthesize_speech(session, &text, voice.as_deref())
                .await?;
            save(out_dir, &blob)?;
        }

        Commands::StoryboardPrompt { page } => {
            let source = source_from(&page)?;
            println!("{}", pipeline.storyboard_prompt(session, &source).await?);
        }

        Commands::StoryboardImage { prompt, reference } => {
            let reference = reference.as_deref().map(read_image).transpose()?;
            let blob = pipeline
                .storyboard_image(session, &prompt, reference.as_ref())
                .await?;
            save(out_dir, &blob)?;
        }

        Commands::VideoPrompt { page } => {
            let source = source_from(&page)?;
            println!("{}", pipeline.video_prompt(session, &source).await?);
        }

        Commands::Translate { text } => {
            println!("{}", pipeline.translate_for_video(session, &text).await?);
        }

        Commands::Video {
            prompt,
            image,
            resolution,
            aspect_ratio,
        } => {
            let image = read_image(&image)?;
            let blob = pipeline
                .generate_video(session, &prompt, &image, resolution, aspect_ratio)
                .await?;
            save(out_dir, &blob)?;
        }

        Commands::Dialogue { page } => {
            let source = source_from(&page)?;
            println!("{}", pipeline.dialogue_script(session, &source).await?);
        }

        Commands::DialogueSpeech { script, page } => {
            let script = match (script, page) {
                (Some(path), _) => std::fs::read_to_string(path)?,
                (None, Some(path)) => read_page(&path)?.dialogue_script,
                (None, None) => return Err("dialogue-speech needs --script or --page".into()),
            };
            let blob = pipeline.synthesize_dialogue(session, &script).await?;
            save(out_dir, &blob)?;
        }
    }

    Ok(())
}

/// The flag's voice, else the page's, skipping blank names so the configured
/// default applies.
fn choose_voice(flag: Option<String>, page: Option<String>) -> Option<String> {
    let named = |voice: &String| !voice.trim().is_empty();
    flag.filter(named).or(page.filter(named))
}

fn source_from(page: &Path) -> Result<VerifiedSource, Box<dyn std::error::Error>> {
    Ok(VerifiedSource::from_page(&read_page(page)?))
}

fn save(out_dir: &Path, blob: &MediaBlob) -> CommandResult {
    let path = write_blob(out_dir, blob)?;
    info!(path = %path.display(), mime_type = %blob.mime_type(), "Saved media");
    println!("{}", path.display());
    Ok(())
}
