//! Instruction templates.
//!
//! Templates that consume page content quote the verified fields exactly as
//! stored, inside a labeled source-of-truth block, and forbid adding facts
//! that are not in it.

use lessonloom_core::VerifiedSource;

pub(crate) const ANALYZE_PAGE: &str = "You are an expert teacher preparing a lesson from a scanned \
textbook page. Analyze the attached page image and respond with JSON containing:\n\
- \"analysis\": the key teaching points of the page and how to present them,\n\
- \"extractedText\": every piece of text on the page, transcribed exactly,\n\
- \"imageDescription\": a precise description of every figure, diagram and photo on the page.";

pub(crate) const TRANSLATE_FOR_VIDEO: &str = "Rewrite the following text as one concise English \
description of a visual scene, suitable as a prompt for a video generation model. \
Respond with the description only.";

pub(crate) const DIALOGUE_SPEECH: &str =
    "Read the following conversation aloud, giving each speaker their own voice:";

/// Roadmap request text for a course.
pub(crate) fn roadmap(context: &str, page_count: usize) -> String {
    format!(
        "You are an expert teacher planning a chapter. The {} attached images are the \
         chapter's textbook pages, in order.\n\n\
         Teacher's context:\n{}\n\n\
         Write a teaching roadmap for the chapter: the learning goals, the order in which \
         to cover the pages, and how the pages connect.",
        page_count, context
    )
}

/// The labeled source-of-truth block shared by every downstream stage.
fn source_of_truth(source: &VerifiedSource) -> String {
    format!(
        "SOURCE OF TRUTH (verified by the teacher; use exactly as given):\n\
         <extracted_text>\n{}\n</extracted_text>\n\
         <image_description>\n{}\n</image_description>\n\n\
         Use only the facts in the source of truth above. Do not invent any content \
         that is not present in it.",
        source.extracted_text(),
        source.image_description()
    )
}

/// Narration a teacher reads aloud for the page.
pub(crate) fn teacher_script(source: &VerifiedSource) -> String {
    format!(
        "{}\n\n\
         Write a warm, clear script a teacher would read aloud to explain this page to \
         students. Write only the spoken words, with no stage directions or headings.",
        source_of_truth(source)
    )
}

/// Prompt text for an illustrative storyboard image.
pub(crate) fn storyboard_prompt(source: &VerifiedSource) -> String {
    format!(
        "{}\n\n\
         Write a prompt for an image generation model describing a single storyboard \
         illustration that teaches the main idea of this page. Describe composition, \
         subjects and style. Respond with the prompt only.",
        source_of_truth(source)
    )
}

/// Prompt text for a short animated clip.
pub(crate) fn video_prompt(source: &VerifiedSource) -> String {
    format!(
        "{}\n\n\
         Write a prompt for a video generation model describing an eight-second animated \
         clip that brings this page's main idea to life. Describe the motion, camera and \
         setting. Respond with the prompt only.",
        source_of_truth(source)
    )
}

/// Two-participant dialogue between the given speaker labels.
pub(crate) fn dialogue_script(source: &VerifiedSource, first: &str, second: &str) -> String {
    format!(
        "{}\n\n\
         Write a short dialogue in which {first} explains this page to {second} and \
         {second} asks questions. Put each line on its own line in the form \
         \"{first}: ...\" or \"{second}: ...\", using only those two speaker labels.",
        source_of_truth(source)
    )
}

/// Request text for a storyboard image.
pub(crate) fn storyboard_image(prompt: &str, has_reference: bool) -> String {
    if has_reference {
        format!(
            "Create an educational storyboard illustration. Keep it consistent with the \
             attached textbook page.\n\n{}",
            prompt
        )
    } else {
        format!("Create an educational storyboard illustration.\n\n{}", prompt)
    }
}
