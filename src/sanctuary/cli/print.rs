use chrono::{DateTime, Utc};
use colored::Colorize;
use sanctuary::api::{CmdMessage, MessageLevel};
use sanctuary::config::{SanctuaryConfig, CONFIG_KEYS};
use sanctuary::model::{Resource, ResourceKind, Tag, Video};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const KIND_WIDTH: usize = 9;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per resource: kind, title and tag names, age on the right.
/// `tags` is the tag collection used to show names instead of ids.
pub(super) fn print_resources(resources: &[Resource], tags: &[Tag]) {
    if resources.is_empty() {
        println!("No resources found.");
        return;
    }

    for resource in resources {
        let kind = format!("{:<width$}", resource.kind.as_str(), width = KIND_WIDTH);
        let labels = tag_labels(&resource.tags, tags);
        let text = if labels.is_empty() {
            resource.title.clone()
        } else {
            format!("{} #{}", resource.title, labels.join(" #"))
        };

        let available = LINE_WIDTH.saturating_sub(KIND_WIDTH + 2 + TIME_WIDTH);
        let text = truncate_to_width(&text, available);
        let padding = available.saturating_sub(text.width());

        println!(
            "  {}{}{}{}",
            kind_colored(resource.kind, &kind),
            text,
            " ".repeat(padding),
            format_time_ago(resource.created_at).dimmed()
        );
    }
}

pub(super) fn print_full_resource(resource: &Resource, tags: &[Tag]) {
    println!(
        "{} {}",
        kind_colored(resource.kind, resource.kind.as_str()),
        resource.title.bold()
    );
    println!("--------------------------------");
    println!("{}", resource.url.underline());
    if !resource.description.is_empty() {
        println!();
        println!("{}", resource.description);
    }
    let labels = tag_labels(&resource.tags, tags);
    if !labels.is_empty() {
        println!();
        println!("{}", format!("#{}", labels.join(" #")).cyan());
    }
    for (key, value) in &resource.metadata {
        let value = value
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string());
        println!("{} {}", format!("{}:", key).dimmed(), value);
    }
    println!(
        "{}",
        format!(
            "id {}  updated {}",
            resource.id,
            resource.updated_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
}

/// Tags grouped under their category, uncategorized last.
pub(super) fn print_tags(tags: &[Tag]) {
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }

    let mut categories: Vec<Option<&str>> = Vec::new();
    for tag in tags {
        let category = tag.category.as_deref();
        if category.is_some() && !categories.contains(&category) {
            categories.push(category);
        }
    }
    if tags.iter().any(|t| t.category.is_none()) {
        categories.push(None);
    }

    for category in categories {
        println!("{}", category.unwrap_or("uncategorized").bold());
        for tag in tags.iter().filter(|t| t.category.as_deref() == category) {
            println!("  {}  {}", tag.name, tag.id.dimmed());
        }
    }
}

pub(super) fn print_categories(categories: &[String]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    for category in categories {
        println!("{}", category);
    }
}

pub(super) fn print_videos(videos: &[Video]) {
    if videos.is_empty() {
        println!("No videos found.");
        return;
    }

    for video in videos {
        let right = if video.duration.is_empty() {
            String::new()
        } else {
            format!(" {}", video.duration)
        };
        let channel = if video.channel.is_empty() {
            String::new()
        } else {
            format!(" ({})", video.channel)
        };
        let id = format!("{}  ", video.id);

        let available = LINE_WIDTH.saturating_sub(2 + id.width() + right.width());
        let text = truncate_to_width(&format!("{}{}", video.title, channel), available);
        let padding = available.saturating_sub(text.width());
        println!(
            "  {}{}{}{}",
            id.yellow(),
            text,
            " ".repeat(padding),
            right.dimmed()
        );
        if !video.tags.is_empty() {
            println!(
                "  {}{}",
                " ".repeat(id.width()),
                format!("#{}", video.tags.join(" #")).cyan()
            );
        }
    }
}

pub(super) fn print_config(config: &SanctuaryConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn tag_labels(ids: &[String], tags: &[Tag]) -> Vec<String> {
    ids.iter()
        .map(|id| {
            tags.iter()
                .find(|t| &t.id == id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| id.clone())
        })
        .collect()
}

fn kind_colored(kind: ResourceKind, text: &str) -> colored::ColoredString {
    match kind {
        ResourceKind::Video => text.red(),
        ResourceKind::Book => text.blue(),
        ResourceKind::Article => text.green(),
        ResourceKind::Course => text.magenta(),
        ResourceKind::Tool => text.yellow(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
