//! Grouping of a week's lessons by section.

use super::node::{ContentNode, Section};

/// Lessons sharing a section, in first-appearance order
#[derive(Debug, Clone, PartialEq)]
pub struct LessonSection<'a> {
    /// `None` collects lessons that have no section
    pub header: Option<&'a Section>,
    pub lessons: Vec<&'a ContentNode>,
}

/// Group lessons by section title.
///
/// Sections appear in the order their first lesson appears; lessons keep
/// their relative order inside a section.
pub fn group_by_section<'a, I>(lessons: I) -> Vec<LessonSection<'a>>
where
    I: IntoIterator<Item = &'a ContentNode>,
{
    let mut sections: Vec<LessonSection<'a>> = Vec::new();

    for lesson in lessons {
        let title = lesson.section.as_ref().map(|s| s.title.as_str());
        match sections
            .iter_mut()
            .find(|s| s.header.map(|h| h.title.as_str()) == title)
        {
            Some(section) => section.lessons.push(lesson),
            None => sections.push(LessonSection {
                header: lesson.section.as_ref(),
                lessons: vec![lesson],
            }),
        }
    }

    sections
}
