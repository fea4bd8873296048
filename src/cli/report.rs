//! Plain-text reports for the terminal

use std::fmt::Write;

use crate::types::money::format_currency;
use crate::types::{
    EntertainmentBoard, EntertainmentRecord, ExpenseList, Overview, ProjectBoard, ProjectRecord,
    StatusColumn, TodoList, TodoRecord,
};

/// Width of the label column in aligned rows
const LABEL_WIDTH: usize = 18;

pub fn overview(overview: &Overview) -> String {
    let mut out = String::new();
    let summary = &overview.summary;

    let _ = writeln!(out, "Welcome back, {}", overview.profile.display_name);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{}",
        "This Month",
        format_currency(summary.total_monthly_expense)
    );
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{}",
        "Pending Tasks", summary.pending_todo_count
    );
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{}",
        "Playing/Watching", summary.active_entertainment_count
    );

    if overview.shows_trend_chart() {
        let _ = writeln!(out, "\nExpense Trend");
        for point in &overview.trend_series {
            let _ = writeln!(
                out,
                "  {:<LABEL_WIDTH$}{}",
                point.label,
                format_currency(point.value)
            );
        }
    }

    if overview.shows_category_chart() {
        let _ = writeln!(out, "\nBy Category");
        for point in &overview.category_series {
            let _ = writeln!(
                out,
                "  {:<LABEL_WIDTH$}{}",
                point.label,
                format_currency(point.value)
            );
        }
    }

    let _ = writeln!(out, "\nUpcoming Tasks");
    if overview.upcoming_todos.is_empty() {
        let _ = writeln!(out, "  No pending tasks. You're all caught up!");
    }
    for todo in &overview.upcoming_todos {
        let _ = writeln!(out, "  - {}", todo_line(todo));
    }

    let _ = writeln!(out, "\nIn Progress");
    if overview.active_entertainment.is_empty() {
        let _ = writeln!(out, "  Start playing or watching something!");
    }
    for item in &overview.active_entertainment {
        let _ = writeln!(out, "  - {}", entertainment_line(item));
    }

    out
}

pub fn expenses(list: &ExpenseList) -> String {
    let mut out = String::new();

    if list.expenses.is_empty() {
        let _ = writeln!(out, "No expenses yet.");
        return out;
    }

    for expense in &list.expenses {
        let _ = writeln!(
            out,
            "{}  {:<14}{:>10}  {}",
            expense.date,
            expense.category,
            format_currency(expense.amount),
            expense.description
        );
    }
    let _ = writeln!(out, "\nTotal: {}", format_currency(list.total));
    out
}

pub fn todos(list: &TodoList) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} of {} completed",
        list.progress.completed, list.progress.total
    );
    for todo in &list.todos {
        let mark = if todo.completed { "x" } else { " " };
        let _ = writeln!(out, "[{}] {}", mark, todo_line(todo));
    }
    out
}

pub fn projects(board: &ProjectBoard) -> String {
    let mut out = String::new();

    project_column(&mut out, "Idea", &board.idea);
    project_column(&mut out, "In Progress", &board.in_progress);
    project_column(&mut out, "Done", &board.done);
    if !board.unrecognized.is_empty() {
        project_column(&mut out, "Other", &board.unrecognized);
    }
    out
}

pub fn backlog(board: &EntertainmentBoard) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Games");
    status_columns(&mut out, &board.games);
    let _ = writeln!(out, "\nMovies & Series");
    status_columns(&mut out, &board.screen);
    out
}

fn todo_line(todo: &TodoRecord) -> String {
    match todo.due_date {
        Some(due) => format!("{} (due {})", todo.title, due),
        None => todo.title.clone(),
    }
}

fn entertainment_line(item: &EntertainmentRecord) -> String {
    format!("{} [{} · {}]", item.title, item.kind, item.status)
}

fn project_column(out: &mut String, title: &str, projects: &[ProjectRecord]) {
    let _ = writeln!(out, "{} ({})", title, projects.len());
    for project in projects {
        let _ = writeln!(out, "  - {}", project.title);
    }
}

fn status_columns(out: &mut String, columns: &[StatusColumn]) {
    for column in columns {
        let _ = writeln!(out, "  {} ({})", column.status, column.items.len());
        for item in &column.items {
            let _ = writeln!(out, "    - {}", item.title);
        }
    }
}
