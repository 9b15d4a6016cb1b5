//! CLI command definitions.

use clap::{Parser, Subcommand};
use lessonloom_core::{AspectRatio, VideoResolution};
use std::path::PathBuf;

/// Lessonloom - verified lesson media from scanned textbook pages
#[derive(Parser, Debug)]
#[command(name = "lessonloom")]
#[command(about = "Verified lesson scripts, narration, storyboards and video from textbook pages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Configuration file (defaults to the layered lessonloom.toml search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for generated media
    #[arg(long, default_value = "lessonloom-output", global = true)]
    pub out_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a page image into notes, transcribed text and an image description
    Analyze {
        /// Path to the page image
        image: PathBuf,
    },

    /// Plan a chapter from its page images
    Roadmap {
        /// Teacher's context for the chapter
        #[arg(long)]
        context: String,

        /// Page images in order
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Write the teacher's narration for a page
    Script {
        /// Page JSON with verified text and description
        page: PathBuf,
    },

    /// Synthesize single-voice speech
    Speak {
        /// Text to speak (defaults to the page's teacher script)
        #[arg(long, conflicts_with = "page")]
        text: Option<String>,

        /// Page JSON whose teacher script is spoken
        #[arg(long)]
        page: Option<PathBuf>,

        /// Voice name (defaults to the page's voice, then the configured default)
        #[arg(long)]
        voice: Option<String>,
    },

    /// Write an image prompt for the page's storyboard
    StoryboardPrompt {
        /// Page JSON with verified text and description
        page: PathBuf,
    },

    /// Render a storyboard illustration
    StoryboardImage {
        /// Image prompt
        #[arg(long)]
        prompt: String,

        /// Page image to keep the illustration consistent with
        #[arg(long)]
        reference: Option<PathBuf>,
    },

    /// Write a video prompt for the page
    VideoPrompt {
        /// Page JSON with verified text and description
        page: PathBuf,
    },

    /// Render text as a concise English visual description
    Translate {
        /// Text to translate
        text: String,
    },

    /// Generate a short video clip from a prompt and page image
    Video {
        /// Video prompt (any language)
        #[arg(long)]
        prompt: String,

        /// Page image used as the first frame
        #[arg(long)]
        image: PathBuf,

        /// Output resolution (720p or 1080p)
        #[arg(long, default_value = "720p")]
        resolution: VideoResolution,

        /// Aspect ratio (16:9 or 9:16)
        #[arg(long, default_value = "16:9")]
        aspect_ratio: AspectRatio,
    },

    /// Write a teacher and student dialogue for a page
    Dialogue {
        /// Page JSON with verified text and description
        page: PathBuf,
    },

    /// Synthesize two-voice dialogue audio
    DialogueSpeech {
        /// File containing the dialogue script
        #[arg(long, conflicts_with = "page")]
        script: Option<PathBuf>,

        /// Page JSON whose dialogue script is spoken
        #[arg(long)]
        page: Option<PathBuf>,
    },
}
