use minewalk_core::{Board, CellIndex, GameState};

/// Text grid: `S` start, `G` goal, `*` mine, `@` player, `o` route or
/// visited cell, `.` anything else.
pub fn board(board: &Board, state: Option<&GameState>, route: &[CellIndex]) -> String {
    let mask = board.mine_mask();
    let cols = usize::from(board.cols());
    let mut out = String::with_capacity(mask.len() * 2 + mask.nrows());

    for (row, cells) in mask.rows().into_iter().enumerate() {
        for (col, &is_mine) in cells.iter().enumerate() {
            let index = row * cols + col;
            let glyph = match state {
                Some(state) if state.current_index() == index => '@',
                _ if is_mine => '*',
                _ if index == board.start_index() => 'S',
                _ if index == board.goal_index() => 'G',
                Some(state) if state.visited_safe().contains(index) => 'o',
                _ if route.contains(&index) => 'o',
                _ => '.',
            };
            out.push(glyph);
            out.push(if col + 1 == cols { '\n' } else { ' ' });
        }
    }
    out
}
