//! Demo board used as the starting state before a backend is wired up.

use chrono::NaiveDate;
use mockable::Clock;

use crate::board::domain::{
    Assignee, Board, BoardDomainError, Column, ColumnColor, ColumnTitle, Task, TaskDetails,
    TaskPriority,
};

/// Builds the fixed demo board: "To Do", "In Progress" and "Done" columns
/// with a handful of sample tasks.
///
/// # Errors
///
/// Returns a [`BoardDomainError`] only if the built-in sample data is
/// invalid.
pub fn demo_board(clock: &impl Clock) -> Result<Board, BoardDomainError> {
    let todo = Column::new(ColumnTitle::new("To Do")?, ColumnColor::new("slate")).with_tasks([
        Task::new(
            with_due_date(
                TaskDetails::new("Draft onboarding checklist")?
                    .with_description("Collect the steps new members go through in week one")
                    .with_priority(TaskPriority::Medium)
                    .with_assignees([assignee("Alex Kim", "/avatars/alex.png")?])
                    .with_labels(["docs".to_owned(), "onboarding".to_owned()]),
                2026,
                11,
                3,
            ),
            clock,
        ),
        Task::new(
            TaskDetails::new("Audit notification settings")?
                .with_priority(TaskPriority::Low)
                .with_labels(["settings".to_owned()]),
            clock,
        ),
    ]);

    let in_progress = Column::new(ColumnTitle::new("In Progress")?, ColumnColor::new("blue"))
        .with_tasks([Task::new(
            with_due_date(
                TaskDetails::new("Calendar week view")?
                    .with_priority(TaskPriority::High)
                    .with_assignees([
                        assignee("Sam Rivera", "/avatars/sam.png")?,
                        assignee("Jo Park", "/avatars/jo.png")?,
                    ])
                    .with_labels(["frontend".to_owned(), "calendar".to_owned()]),
                2026,
                10,
                28,
            ),
            clock,
        )]);

    let done = Column::new(ColumnTitle::new("Done")?, ColumnColor::new("green")).with_tasks([
        Task::new(
            TaskDetails::new("Sign-in redirect")?
                .with_priority(TaskPriority::Medium)
                .with_assignees([assignee("Jo Park", "/avatars/jo.png")?])
                .with_labels(["auth".to_owned()]),
            clock,
        ),
    ]);

    Board::from_columns([todo, in_progress, done])
}

fn assignee(name: &str, avatar: &str) -> Result<Assignee, BoardDomainError> {
    Ok(Assignee::new(name)?.with_avatar(avatar))
}

fn with_due_date(details: TaskDetails, year: i32, month: u32, day: u32) -> TaskDetails {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => details.with_due_date(date),
        None => details,
    }
}
