use labyrinth::{Board, Game, Object, Position};
use rand::seq::IteratorRandom;
use rand::Rng;

/// How often to rotate the spare tile before inserting it.
pub fn choose_rotations<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(0..4)
}

/// A random insertion point among the ones that are legal right now.
pub fn choose_insertion_point<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Position {
    // At most one of the 12 insertion points is blocked
    let points = board.insertion_points();
    points[rng.gen_range(0..points.len())]
}

/// Where the active player walks to after the maze has been shifted.
///
/// Heads for the tile of the current objective, or home once every objective
/// has been found. When that is out of reach, any reachable cell will do.
pub fn choose_target<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Position {
    let player = game.current_player();
    let reachable = game.reachable_positions();
    let goal = match player.objective() {
        Some(object) => find_object(game.board(), object),
        None => Some(player.color().home()),
    };
    match goal {
        Some(goal) if reachable.contains(goal) => goal,
        _ => reachable
            .into_iter()
            .choose(rng)
            .unwrap_or_else(|| player.position()),
    }
}

/// The cell of the tile showing `object`. `None` if it is on the spare tile.
pub fn find_object(board: &Board, object: Object) -> Option<Position> {
    Position::all().find(|&position| board.tile_at(position).objective() == Some(object))
}
