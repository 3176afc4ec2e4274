//! Project and task forms and their client-side validation
//!
//! A form that fails validation is answered locally and never forwarded.

use chrono::NaiveDate;
use common::ValidationErrors;
use serde::{Deserialize, Serialize};

use crate::models::LoginForm;

/// Project lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    OnHold,
    Completed,
    Archived,
    Cancelled,
}

impl ProjectStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "on_hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Task workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TODO" => Some(Self::Todo),
            "IN_PROGRESS" => Some(Self::InProgress),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

/// Status field that falls back to `T::default()` when absent and
/// records an error when present but unknown
fn parse_choice<T: Default>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    message: &str,
) -> T {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => T::default(),
        Some(value) => parse(value).unwrap_or_else(|| {
            errors.add(field, message);
            T::default()
        }),
    }
}

/// Id field as posted by a form: a select submits it as a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FormId {
    Number(i64),
    Text(String),
}

fn parse_id(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FormId>,
) -> Option<i64> {
    match value {
        Some(FormId::Number(id)) => Some(*id),
        Some(FormId::Text(text)) if !text.trim().is_empty() => match text.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(field, "Invalid project");
                None
            }
        },
        _ => {
            errors.add(field, "Project is required");
            None
        }
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "email", &self.email, "Email is required");
        required(&mut errors, "password", &self.password, "Password is required");
        errors.into_result()
    }
}

/// Project create/edit form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Validated project payload sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPayload {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<ProjectPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        required(&mut errors, "name", &self.name, "Project name is required");
        let status = parse_choice(
            &mut errors,
            "status",
            self.status.as_deref(),
            ProjectStatus::parse,
            "Invalid project status",
        );

        errors.into_result()?;

        Ok(ProjectPayload {
            name: self.name.trim().to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            status,
        })
    }
}

/// Task create/edit form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub project_id: Option<FormId>,
}

/// Validated task payload sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub project_id: i64,
}

impl TaskForm {
    pub fn validate(&self) -> Result<TaskPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        required(&mut errors, "title", &self.title, "Title is required");
        required(
            &mut errors,
            "description",
            &self.description,
            "Description is required",
        );

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("due_date", "Due date is required");
                None
            }
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("due_date", "Due date must be a valid date");
                    None
                }
            },
        };

        let project_id = parse_id(&mut errors, "project_id", self.project_id.as_ref());

        let status = parse_choice(
            &mut errors,
            "status",
            self.status.as_deref(),
            TaskStatus::parse,
            "Invalid task status",
        );
        let priority = parse_choice(
            &mut errors,
            "priority",
            self.priority.as_deref(),
            TaskPriority::parse,
            "Invalid task priority",
        );

        match (due_date, project_id) {
            (Some(due_date), Some(project_id)) if errors.is_empty() => Ok(TaskPayload {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                status,
                priority,
                due_date,
                project_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of a task status change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusForm {
    pub status: String,
}

impl StatusForm {
    pub fn validate(&self) -> Result<TaskStatus, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match TaskStatus::parse(self.status.trim()) {
            Some(status) => Ok(status),
            None => {
                errors.add("status", "Invalid task status");
                Err(errors)
            }
        }
    }
}
