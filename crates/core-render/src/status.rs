//! Status line composition.
//!
//! Format: ` -- INSERT --  <name>[*]  <col>:<row>` followed by either
//! `  err: <message>` when the cursor row carries an annotation, or
//! `  <message>` for a pending ephemeral message. Column and row are 1-based.
//! The annotation wins when both are present.
//!
//! Two stages, as elsewhere in the renderer: `compose_status` produces
//! ordered segments, `format_status` turns them into the string.

/// What the status line needs from the editor.
pub struct StatusContext<'a> {
    pub file_name: &'a str,
    pub modified: bool,
    pub row: usize, // 0-based
    pub col: usize, // 0-based
    pub annotation: Option<&'a str>,
    pub message: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    FileName { name: &'a str, modified: bool },
    Position { col_1: usize, row_1: usize },
    Annotation(&'a str),
    Message(&'a str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::Mode("INSERT"));
    out.push(StatusSegment::FileName {
        name: ctx.file_name,
        modified: ctx.modified,
    });
    out.push(StatusSegment::Position {
        col_1: ctx.col + 1,
        row_1: ctx.row + 1,
    });
    if let Some(msg) = ctx.annotation {
        out.push(StatusSegment::Annotation(msg));
    } else if let Some(msg) = ctx.message {
        out.push(StatusSegment::Message(msg));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(64);
    for seg in segments {
        let _ = match seg {
            StatusSegment::Mode(m) => write!(s, " -- {m} --"),
            StatusSegment::FileName { name, modified } => {
                write!(s, "  {name}{}", if *modified { "*" } else { "" })
            }
            StatusSegment::Position { col_1, row_1 } => write!(s, "  {col_1}:{row_1}"),
            StatusSegment::Annotation(msg) => write!(s, "  err: {msg}"),
            StatusSegment::Message(msg) => write!(s, "  {msg}"),
        };
    }
    s
}

pub fn build_status(ctx: &StatusContext) -> String {
    format_status(&compose_status(ctx))
}
