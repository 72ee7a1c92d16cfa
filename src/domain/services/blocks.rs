use lazy_static::lazy_static;
use regex::Regex;
use tera::escape_html;
use crate::domain::models::page::{CaptionedImage, ContentBlock, ImageBlock, VideoBlock};

lazy_static! {
    static ref YOUTUBE_PATTERNS: Vec<Regex> = [
        r"youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})",
        r"youtu\.be/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/embed/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/v/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/watch\?.*v=([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect();
}

/// Extracts the 11-character video id from the common YouTube URL shapes.
pub fn youtube_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    YOUTUBE_PATTERNS.iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    blocks.iter().map(render_block).collect::<Vec<_>>().join("\n")
}

pub fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Heading(text) => render_heading(text),
        ContentBlock::Paragraph(html) => render_paragraph(html),
        ContentBlock::Image(image) => render_image(image),
        ContentBlock::ImageWithCaption(image) => render_captioned_image(image),
        ContentBlock::EmbeddedVideo(video) => render_video(video),
        ContentBlock::Quote(text) => render_quote(text),
    }
}

fn render_heading(text: &str) -> String {
    format!(r#"<h2 class="block-heading">{}</h2>"#, escape_html(text))
}

fn render_paragraph(html: &str) -> String {
    format!(r#"<div class="block-paragraph">{}</div>"#, html)
}

fn render_image(image: &ImageBlock) -> String {
    format!(
        r#"<figure class="block-image"><img src="{}" alt="{}"></figure>"#,
        escape_html(&image.url),
        escape_html(&image.alt)
    )
}

fn render_captioned_image(image: &CaptionedImage) -> String {
    let caption = if image.caption.is_empty() {
        String::new()
    } else {
        format!("<figcaption>{}</figcaption>", escape_html(&image.caption))
    };
    format!(
        r#"<figure class="block-image"><img src="{}" alt="{}">{}</figure>"#,
        escape_html(&image.url),
        escape_html(&image.caption),
        caption
    )
}

fn render_video(video: &VideoBlock) -> String {
    let player = match youtube_id(&video.url) {
        Some(id) => format!(
            r#"<div class="video-frame"><iframe src="https://www.youtube.com/embed/{}" title="YouTube video" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe></div>"#,
            id
        ),
        None if is_web_url(&video.url) => {
            format!(r#"<a href="{0}" rel="noopener">{0}</a>"#, escape_html(video.url.trim()))
        }
        None => format!(r#"<span class="video-url">{}</span>"#, escape_html(&video.url)),
    };
    let caption = if video.caption.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="video-caption">{}</p>"#, escape_html(&video.caption))
    };
    format!(r#"<div class="block-video">{}{}</div>"#, player, caption)
}

fn is_web_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.starts_with("https://") || url.starts_with("http://")
}

fn render_quote(text: &str) -> String {
    format!(r#"<blockquote class="block-quote">{}</blockquote>"#, escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_id_url_forms() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(youtube_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(youtube_id("https://www.youtube.com/v/dQw4w9WgXcQ"), id);
        assert_eq!(youtube_id("https://www.youtube.com/watch?feature=player_embedded&v=dQw4w9WgXcQ"), id);
        assert_eq!(youtube_id("  https://youtu.be/dQw4w9WgXcQ  "), id);
    }

    #[test]
    fn test_youtube_id_rejects_other_urls() {
        assert_eq!(youtube_id(""), None);
        assert_eq!(youtube_id("https://vimeo.com/123456"), None);
        assert_eq!(youtube_id("https://youtu.be/short"), None);
    }

    #[test]
    fn test_text_blocks_are_escaped() {
        let html = render_block(&ContentBlock::Heading("Rooms & <Suites>".into()));
        assert_eq!(html, r#"<h2 class="block-heading">Rooms &amp; &lt;Suites&gt;</h2>"#);

        let quote = render_block(&ContentBlock::Quote("\"Best stay\"".into()));
        assert!(quote.contains("&quot;Best stay&quot;"));
    }

    #[test]
    fn test_paragraph_keeps_rich_text() {
        let html = render_block(&ContentBlock::Paragraph("<ul><li>Spa</li></ul>".into()));
        assert!(html.contains("<ul><li>Spa</li></ul>"));
    }

    #[test]
    fn test_video_block_embeds_youtube_or_links() {
        let embed = render_block(&ContentBlock::EmbeddedVideo(VideoBlock {
            url: "https://youtu.be/dQw4w9WgXcQ".into(),
            caption: "Tour".into(),
        }));
        assert!(embed.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(embed.contains("Tour"));

        let link = render_block(&ContentBlock::EmbeddedVideo(VideoBlock {
            url: "https://vimeo.com/1".into(),
            caption: String::new(),
        }));
        assert!(link.contains("<a href="));
        assert!(link.contains("vimeo.com"));
        assert!(!link.contains("iframe"));
    }

    #[test]
    fn test_video_fallback_only_links_web_urls() {
        let html = render_block(&ContentBlock::EmbeddedVideo(VideoBlock {
            url: "javascript:alert(1)".into(),
            caption: String::new(),
        }));
        assert!(!html.contains("<a "));
        assert!(html.contains("javascript:alert(1)"));

        let html = render_block(&ContentBlock::EmbeddedVideo(VideoBlock {
            url: " JavaScript:alert(1)".into(),
            caption: String::new(),
        }));
        assert!(!html.contains("href"));

        let html = render_block(&ContentBlock::EmbeddedVideo(VideoBlock {
            url: "HTTP://example.com/clip.mp4".into(),
            caption: String::new(),
        }));
        assert!(html.contains("<a href="));
    }

    #[test]
    fn test_captioned_image() {
        let html = render_blocks(&[
            ContentBlock::ImageWithCaption(CaptionedImage { url: "/m/a.jpg".into(), caption: "Lobby".into() }),
            ContentBlock::Image(ImageBlock { url: "/m/b.jpg".into(), alt: String::new() }),
        ]);
        assert!(html.contains("<figcaption>Lobby</figcaption>"));
        assert!(html.contains("b.jpg"));
    }
}
