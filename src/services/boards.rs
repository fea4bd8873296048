//! Board views: todo progress, project kanban, entertainment backlog

use crate::services::Aggregator;
use crate::types::{
    EntertainmentBoard, EntertainmentKind, EntertainmentRecord, EntertainmentStatus, ExpenseList,
    ExpenseRecord, ProjectBoard, ProjectRecord, ProjectStatus, StatusColumn, TodoList,
    TodoProgress, TodoRecord,
};

/// Columns of the games board
pub const GAME_COLUMNS: [EntertainmentStatus; 3] = [
    EntertainmentStatus::Backlog,
    EntertainmentStatus::Playing,
    EntertainmentStatus::Completed,
];

/// Columns of the movies & series board
pub const SCREEN_COLUMNS: [EntertainmentStatus; 3] = [
    EntertainmentStatus::Backlog,
    EntertainmentStatus::Watching,
    EntertainmentStatus::Watched,
];

pub struct Boards;

impl Boards {
    pub fn expense_list(expenses: Vec<ExpenseRecord>) -> ExpenseList {
        ExpenseList {
            total: Aggregator::total(&expenses),
            expenses,
        }
    }

    pub fn todo_progress(todos: &[TodoRecord]) -> TodoProgress {
        TodoProgress {
            completed: todos.iter().filter(|t| t.completed).count(),
            total: todos.len(),
        }
    }

    pub fn todo_list(todos: Vec<TodoRecord>) -> TodoList {
        TodoList {
            progress: Self::todo_progress(&todos),
            todos,
        }
    }

    /// Group projects into kanban columns, keeping input order per column
    pub fn project_board(projects: Vec<ProjectRecord>) -> ProjectBoard {
        let mut board = ProjectBoard::default();

        for project in projects {
            match project.status {
                ProjectStatus::Idea => board.idea.push(project),
                ProjectStatus::InProgress => board.in_progress.push(project),
                ProjectStatus::Done => board.done.push(project),
                ProjectStatus::Unrecognized(_) => board.unrecognized.push(project),
            }
        }

        board
    }

    /// Games by status; movies and series share one board, movies listed
    /// before series within each column.
    /// Items whose status has no column on their board are left out.
    pub fn entertainment_board(items: &[EntertainmentRecord]) -> EntertainmentBoard {
        let of_kind = move |kind: EntertainmentKind| items.iter().filter(move |i| i.kind == kind);

        let games: Vec<&EntertainmentRecord> = of_kind(EntertainmentKind::Game).collect();
        let screen: Vec<&EntertainmentRecord> = of_kind(EntertainmentKind::Movie)
            .chain(of_kind(EntertainmentKind::Series))
            .collect();

        EntertainmentBoard {
            games: columns(&games, &GAME_COLUMNS),
            screen: columns(&screen, &SCREEN_COLUMNS),
        }
    }
}

fn columns(items: &[&EntertainmentRecord], statuses: &[EntertainmentStatus]) -> Vec<StatusColumn> {
    statuses
        .iter()
        .map(|status| StatusColumn {
            status: status.clone(),
            items: items
                .iter()
                .filter(|i| &i.status == status)
                .map(|i| (*i).clone())
                .collect(),
        })
        .collect()
}
