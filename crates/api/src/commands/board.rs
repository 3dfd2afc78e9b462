//! Stage board commands

use applymate_domain::{Application, Result, Stage, StageCount};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// One board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    /// Stage shown in this column
    pub stage: Stage,
    /// Column heading
    pub label: &'static str,
    /// Cards in board order
    pub applications: Vec<Application>,
}

fn columns(ctx: &AppContext) -> Vec<BoardColumn> {
    ctx.board
        .grouped()
        .into_iter()
        .map(|(stage, applications)| BoardColumn { stage, label: stage.label(), applications })
        .collect()
}

/// Fetch all applications and return them as pipeline columns
pub async fn load_board(ctx: &AppContext) -> Result<Vec<BoardColumn>> {
    execute_command("board::load_board", || async {
        ctx.require_session()?;
        ctx.board.load(&ctx.api).await?;
        Ok(columns(ctx))
    })
    .await
}

/// Columns as currently held, including in-flight moves
pub fn board_columns(ctx: &AppContext) -> Vec<BoardColumn> {
    columns(ctx)
}

/// Move a card to another stage
///
/// The board shows `to` right away; if the backend rejects the change the
/// card goes back and the backend error is returned.
pub async fn move_application(ctx: &AppContext, id: i64, to: Stage) -> Result<Application> {
    execute_command("board::move_application", || async {
        ctx.require_session()?;
        ctx.board.move_application(&ctx.api, id, to).await
    })
    .await
}

/// Per-stage counts for the dashboard
pub fn stage_counts(ctx: &AppContext) -> Vec<StageCount> {
    ctx.board.stage_counts()
}
