//! Typed column model and cell formatting for the group files table.
//!
//! Each column is a [`ColumnDescriptor`] plus a [`CellFormatter`] strategy
//! that turns a [`GroupRow`] into the cell's markup. Sorting and paging are
//! left to the caller; rows arrive already ordered.

use serde::Serialize;

use crate::approval::OverallStatus;
use crate::display::{DisplayFormatter, NO_TIME};
use crate::error::CoreError;
use crate::summary::ApprovalSummary;
use crate::tooltip::{escape_html, DetailsTooltip};
use crate::types::{DbId, Member, StoredFile, Timestamp};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Stored teacher approval value for an approved file.
pub const TEACHER_APPROVED: i16 = 1;

/// Stored teacher approval value for a rejected file.
pub const TEACHER_REJECTED: i16 = 2;

/// Header markup of the selection column.
pub const SELECT_ALL_HEADER: &str =
    r#"<input type="checkbox" id="selectallnone" name="selectallnone" onclick="toggle_userselection()">"#;

/// Help text shown next to the student approval header.
pub const STUDENT_APPROVAL_HELP: &str = "Shows whether the group agreed to publish the file. \
    Hover the details icon to see each member's decision.";

/* --------------------------------------------------------------------------
Columns
-------------------------------------------------------------------------- */

/// Column identifiers, in the order they may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    Selection,
    GroupName,
    GroupMembers,
    TimeModified,
    StudentApproval,
    TeacherApproval,
    VisibleForStudents,
}

impl ColumnId {
    /// The formatting strategy for this column.
    pub fn formatter(self) -> &'static dyn CellFormatter {
        match self {
            ColumnId::Selection => &SelectionCell,
            ColumnId::GroupName => &GroupNameCell,
            ColumnId::GroupMembers => &GroupMembersCell,
            ColumnId::TimeModified => &TimeModifiedCell,
            ColumnId::StudentApproval => &StudentApprovalCell,
            ColumnId::TeacherApproval => &TeacherApprovalCell,
            ColumnId::VisibleForStudents => &VisibleForStudentsCell,
        }
    }
}

/// A column's identity and header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub header: String,
    pub help: Option<&'static str>,
}

impl ColumnDescriptor {
    fn new(id: ColumnId, header: &str) -> Self {
        Self {
            id,
            header: header.to_string(),
            help: None,
        }
    }
}

/// Viewer- and instance-dependent switches that shape the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// The viewer may approve files (adds the approval columns).
    pub can_approve: bool,
    pub obtain_student_approval: bool,
    pub obtain_teacher_approval: bool,
}

/// Columns of the group files table for the given options.
pub fn group_columns(options: &TableOptions) -> Vec<ColumnDescriptor> {
    let mut columns = vec![
        ColumnDescriptor::new(ColumnId::Selection, SELECT_ALL_HEADER),
        ColumnDescriptor::new(ColumnId::GroupName, "Group"),
        ColumnDescriptor::new(ColumnId::GroupMembers, "Group members"),
        ColumnDescriptor::new(ColumnId::TimeModified, "Last modified"),
    ];

    if options.can_approve {
        if options.obtain_student_approval {
            columns.push(ColumnDescriptor {
                help: Some(STUDENT_APPROVAL_HELP),
                ..ColumnDescriptor::new(ColumnId::StudentApproval, "Student approval")
            });
            columns.push(ColumnDescriptor::new(
                ColumnId::TeacherApproval,
                "Obtain student approval",
            ));
        } else {
            columns.push(ColumnDescriptor::new(ColumnId::TeacherApproval, "Teacher approval"));
        }
        columns.push(ColumnDescriptor::new(
            ColumnId::VisibleForStudents,
            "Visible for students",
        ));
    }

    columns
}

/* --------------------------------------------------------------------------
Rows
-------------------------------------------------------------------------- */

/// One submitted file of a group, with its approval detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFile {
    pub file: StoredFile,
    pub teacher_approval: Option<i16>,
    pub summary: ApprovalSummary,
}

/// One table row: a group with its members and submitted files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRow {
    pub group_id: DbId,
    pub group_name: String,
    pub members: Vec<Member>,
    pub files: Vec<GroupFile>,
    pub time_modified: Option<Timestamp>,
}

/// Collaborators available while formatting cells.
pub struct RenderContext<'a> {
    pub display: &'a dyn DisplayFormatter,
    pub options: &'a TableOptions,
}

/// Formats one column of a row.
pub trait CellFormatter {
    fn format(&self, row: &GroupRow, ctx: &RenderContext<'_>) -> Result<String, CoreError>;
}

/// Format every cell of `row`, in column order.
pub fn render_row(
    columns: &[ColumnDescriptor],
    row: &GroupRow,
    ctx: &RenderContext<'_>,
) -> Result<Vec<String>, CoreError> {
    columns
        .iter()
        .map(|column| column.id.formatter().format(row, ctx))
        .collect()
}

/// Whether students can see a file, given the approvals the instance requires.
pub fn is_visible_for_students(
    options: &TableOptions,
    teacher_approval: Option<i16>,
    student_status: OverallStatus,
) -> bool {
    let teacher_ok = !options.obtain_teacher_approval || teacher_approval == Some(TEACHER_APPROVED);
    let student_ok = !options.obtain_student_approval || student_status == OverallStatus::Approved;
    teacher_ok && student_ok
}

/// Status icon for a file-level verdict.
pub fn status_symbol(status: OverallStatus) -> String {
    let (icon, class) = match status {
        OverallStatus::Approved => ("fa-check", "text-success"),
        OverallStatus::Rejected => ("fa-times", "text-danger"),
        OverallStatus::Pending => ("fa-question", "text-warning"),
    };
    format!(
        r#"<i class="icon fa {icon} {class} fa-fw" title="{label}" aria-label="{label}"></i>"#,
        label = status.label()
    )
}

/* --------------------------------------------------------------------------
Cell formatters
-------------------------------------------------------------------------- */

struct SelectionCell;

impl CellFormatter for SelectionCell {
    fn format(&self, row: &GroupRow, _ctx: &RenderContext<'_>) -> Result<String, CoreError> {
        Ok(format!(
            r#"<input type="checkbox" name="selectedgroup[{id}]" value="{id}" class="groupselection">"#,
            id = row.group_id
        ))
    }
}

struct GroupNameCell;

impl CellFormatter for GroupNameCell {
    fn format(&self, row: &GroupRow, _ctx: &RenderContext<'_>) -> Result<String, CoreError> {
        Ok(escape_html(&row.group_name))
    }
}

struct GroupMembersCell;

impl CellFormatter for GroupMembersCell {
    fn format(&self, row: &GroupRow, ctx: &RenderContext<'_>) -> Result<String, CoreError> {
        Ok(row
            .members
            .iter()
            .map(|m| format!("<div>{}</div>", escape_html(&ctx.display.display_name(m))))
            .collect())
    }
}

struct TimeModifiedCell;

impl CellFormatter for TimeModifiedCell {
    fn format(&self, row: &GroupRow, ctx: &RenderContext<'_>) -> Result<String, CoreError> {
        Ok(row
            .time_modified
            .map(|at| ctx.display.date_time(at))
            .unwrap_or_else(|| NO_TIME.to_string()))
    }
}

struct StudentApprovalCell;

impl CellFormatter for StudentApprovalCell {
    fn format(&self, row: &GroupRow, _ctx: &RenderContext<'_>) -> Result<String, CoreError> {
        let mut cell = String::new();
        for file in &row.files {
            let tooltip = DetailsTooltip::wrap(status_symbol(file.summary.overall()), &file.summary)?;
            cell.push_str("<div>");
            cell.push_str(&tooltip.to_html());
            cell.push_str("</div>");
        }
        Ok(cell)
    }
}

struct TeacherApprovalCell;

impl CellFormatter for TeacherApprovalCell {
    fn format(&self, row: &GroupRow, _ctx: &RenderContext<'_>) -> Result<String, CoreError> {
        Ok(row
            .files
            .iter()
            .map(|file| {
                let label = match file.teacher_approval {
                    Some(TEACHER_APPROVED) => "Approved",
                    Some(TEACHER_REJECTED) => "Rejected",
                    _ => "Pending",
                };
                format!("<div>{label}</div>")
            })
            .collect())
    }
}

struct VisibleForStudentsCell;

impl CellFormatter for VisibleForStudentsCell {
    fn format(&self, row: &GroupRow, ctx: &RenderContext<'_>) -> Result<String, CoreError> {
        Ok(row
            .files
            .iter()
            .map(|file| {
                let visible =
                    is_visible_for_students(ctx.options, file.teacher_approval, file.summary.overall());
                format!("<div>{}</div>", if visible { "Yes" } else { "No" })
            })
            .collect())
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
