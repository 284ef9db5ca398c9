//! Section organizer: nests a flat content stream under its headings.

use crate::models::ContentItem;

/// Group a flat item stream into `section` items by heading level.
///
/// Every heading opens a section at its level; following items attach to
/// the innermost open section. A heading at level N closes all open
/// sections at level >= N first. Items before the first heading stay at
/// the top level.
pub fn organize_sections(items: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut root: Vec<ContentItem> = Vec::new();
    // Stack of open (level, content) sections, outermost first.
    let mut stack: Vec<(u8, Vec<ContentItem>)> = Vec::new();

    fn close_one(stack: &mut Vec<(u8, Vec<ContentItem>)>, root: &mut Vec<ContentItem>) {
        if let Some((level, content)) = stack.pop() {
            let section = ContentItem::Section { level, content };
            match stack.last_mut() {
                Some((_, parent)) => parent.push(section),
                None => root.push(section),
            }
        }
    }

    for item in items {
        match item {
            ContentItem::Heading { level, text } => {
                while stack.last().is_some_and(|(open, _)| *open >= level) {
                    close_one(&mut stack, &mut root);
                }
                stack.push((level, vec![ContentItem::Heading { level, text }]));
            }
            other => match stack.last_mut() {
                Some((_, content)) => content.push(other),
                None => root.push(other),
            },
        }
    }

    while !stack.is_empty() {
        close_one(&mut stack, &mut root);
    }

    root
}
