use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Board, Color, GameSnapshot, IllegalAction, InvalidArgument, InvalidOperation, Object,
    ObjectivesDeck, Player, Position, PositionSet, Tile, TurnPhase, ALL_OBJECTS,
};

/// How a game is set up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Between 2 and 4.
    pub num_players: usize,
    /// How many of the 24 objectives are in play, between 16 and 24. They are
    /// dealt evenly, cards that are left over are not used.
    pub objective_count: usize,
}

impl GameConfig {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = Color::ALL.len();
    pub const MIN_OBJECTIVES: usize = 16;
    pub const MAX_OBJECTIVES: usize = 24;

    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&self.num_players) {
            return Err(InvalidArgument::PlayerCount {
                count: self.num_players,
            });
        }
        if !(Self::MIN_OBJECTIVES..=Self::MAX_OBJECTIVES).contains(&self.objective_count) {
            return Err(InvalidArgument::ObjectiveCount {
                count: self.objective_count,
            });
        }
        Ok(())
    }

    /// The number of objective cards each player gets.
    pub fn objectives_per_player(&self) -> usize {
        self.objective_count / self.num_players
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            objective_count: ALL_OBJECTS.len(),
        }
    }
}

/// What happened when the active player moved (or stayed).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    /// The objective that was turned over on arrival.
    pub found: Option<Object>,
    /// The move ended the game.
    pub won: bool,
}

/// A game in progress.
///
/// Players take turns in a fixed order. Each turn has three steps, checked by
/// the active player's [`TurnPhase`]:
/// 1. Optionally rotate the spare tile, then insert it with
///    [`Self::select_insertion_position()`].
/// 2. Move the piece with [`Self::move_current_player()`], or stay with
///    [`Self::pass()`].
/// 3. Hand over to the next player with [`Self::end_turn()`].
///
/// Every action either succeeds, or fails without changing anything.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    /// Index into `players`
    current: usize,
    winner: Option<Color>,
}

impl Game {
    /// Deals a new maze and the objective cards, and puts every player on its home corner.
    ///
    /// The players get the colors in the order of [`Color::ALL`], and the
    /// first one starts.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, InvalidArgument> {
        config.validate()?;
        let board = Board::new(rng);

        let mut objects = ALL_OBJECTS.to_vec();
        objects.shuffle(rng);
        objects.truncate(config.objective_count);
        let players = Color::ALL
            .into_iter()
            .take(config.num_players)
            .zip(objects.chunks_exact(config.objectives_per_player()))
            .map(|(color, objects)| {
                let deck = ObjectivesDeck::new(objects.iter().copied())?;
                Ok(Player::new(color, deck))
            })
            .collect::<Result<Vec<_>, InvalidArgument>>()?;
        debug!(
            num_players = config.num_players,
            objectives_per_player = config.objectives_per_player(),
            "New game"
        );
        Self::from_parts(board, players)
    }

    /// Starts a game on an existing board with existing players, in turn order.
    pub fn from_parts(board: Board, players: Vec<Player>) -> Result<Self, InvalidArgument> {
        if !(GameConfig::MIN_PLAYERS..=GameConfig::MAX_PLAYERS).contains(&players.len()) {
            return Err(InvalidArgument::PlayerCount {
                count: players.len(),
            });
        }
        let mut colors = BTreeSet::new();
        for player in &players {
            if !colors.insert(player.color()) {
                return Err(InvalidArgument::DuplicateColor {
                    color: player.color(),
                });
            }
        }
        Ok(Self {
            board,
            players,
            current: 0,
            winner: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The cells the active player's piece could walk to right now.
    pub fn reachable_positions(&self) -> PositionSet {
        self.board.reachable_from(self.current_player().position())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self)
    }

    /// Turns the spare tile by 90° clockwise, before it is inserted.
    pub fn rotate_spare(&mut self) -> Result<(), IllegalAction> {
        self.check_phase(TurnPhase::Waiting)?;
        self.board.rotate_spare()?;
        trace!(spare = %self.board.spare(), "Rotated spare tile");
        Ok(())
    }

    /// Inserts the spare tile at `position` and returns the tile that was
    /// pushed out, which is the new spare.
    ///
    /// Pieces standing on the shifted line move along with it. A piece on the
    /// tile that falls out ends up on the inserted tile.
    pub fn select_insertion_position(&mut self, position: Position) -> Result<Tile, IllegalAction> {
        self.check_phase(TurnPhase::Waiting)?;
        let displacement = self.board.insert_spare(position)?;
        for player in self.players.iter_mut() {
            let carried_to = displacement.apply(player.position());
            if !player.is_at(carried_to) {
                trace!(
                    color = %player.color(),
                    from = %player.position(),
                    to = %carried_to,
                    "Carried along"
                );
                player.move_to(carried_to);
            }
        }
        self.players[self.current].set_ready_to_move()?;
        Ok(displacement.ejected())
    }

    /// Walks the active player's piece to `target`, which must be reachable.
    ///
    /// Arriving on the tile of the current objective turns it over. Arriving
    /// home with all objectives found wins the game.
    pub fn move_current_player(&mut self, target: Position) -> Result<MoveOutcome, IllegalAction> {
        self.check_phase(TurnPhase::ReadyToMove)?;
        let from = self.current_player().position();
        if !self.board.exist_path_between(from, target) {
            return Err(InvalidArgument::Unreachable { from, to: target }.into());
        }

        let object_on_target = self.board.tile_at(target).objective();
        let player = &mut self.players[self.current];
        player.move_to(target);
        let found = match (player.objective(), object_on_target) {
            (Some(wanted), Some(here)) if wanted == here => {
                player.turn_current_objective_over()?;
                debug!(color = %player.color(), object = ?here, "Objective found");
                if player.next_objective().is_err() {
                    debug!(color = %player.color(), "All objectives found, heading home");
                }
                Some(here)
            }
            _ => None,
        };
        player.set_done()?;

        let won = player.has_won();
        if won {
            debug!(color = %player.color(), "Game won");
            self.winner = Some(player.color());
        }
        trace!(color = %player.color(), %from, to = %target, "Moved");
        Ok(MoveOutcome {
            from,
            to: target,
            found,
            won,
        })
    }

    /// Finishes the move step without walking anywhere.
    pub fn pass(&mut self) -> Result<MoveOutcome, IllegalAction> {
        let position = self.current_player().position();
        self.move_current_player(position)
    }

    /// Hands the turn to the next player and returns its color.
    pub fn end_turn(&mut self) -> Result<Color, IllegalAction> {
        self.check_not_over()?;
        let phase = self.current_player().phase();
        if phase != TurnPhase::Done {
            return Err(InvalidOperation::TurnNotDone { phase }.into());
        }
        self.current = (self.current + 1) % self.players.len();
        let next = &mut self.players[self.current];
        next.set_waiting();
        debug!(color = %next.color(), "Next turn");
        Ok(next.color())
    }

    fn check_not_over(&self) -> Result<(), InvalidOperation> {
        match self.winner {
            Some(winner) => Err(InvalidOperation::GameOver { winner }),
            None => Ok(()),
        }
    }

    fn check_phase(&self, expected: TurnPhase) -> Result<(), InvalidOperation> {
        self.check_not_over()?;
        let phase = self.current_player().phase();
        if phase == expected {
            return Ok(());
        }
        Err(match expected {
            TurnPhase::Waiting => InvalidOperation::NotWaiting { phase },
            TurnPhase::ReadyToMove => InvalidOperation::NotReadyToMove { phase },
            TurnPhase::Done => InvalidOperation::TurnNotDone { phase },
        })
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::board_from_rows;
    use crate::tile;

    fn pos(row: u8, column: u8) -> Position {
        Position::new(row, column).unwrap()
    }

    fn deck(objects: &[Object]) -> ObjectivesDeck {
        ObjectivesDeck::new(objects.iter().copied()).unwrap()
    }

    // Row 1 is a horizontal corridor, every other movable tile is vertical.
    // The corridor tile at (1, 3) carries the owl, the spare is a T-junction.
    fn corridor_board() -> Board {
        let board = board_from_rows(
            [
                "┌│┬│┬│┐",
                "───────",
                "├│├│┬│┤",
                "│││││││",
                "├│┴│┤│┤",
                "│││││││",
                "└│┴│┴│┘",
            ],
            "├",
        );
        let mut tiles = *board.tiles();
        tiles[1][3] = tiles[1][3].with_objective(Object::Owl);
        Board::from_tiles(tiles, *board.spare()).unwrap()
    }

    fn two_player_game() -> Game {
        let players = vec![
            Player::new(Color::Red, deck(&[Object::Owl])),
            Player::new(Color::Blue, deck(&[Object::Bat])),
        ];
        Game::from_parts(corridor_board(), players).unwrap()
    }

    fn invalid_op(result: Result<impl std::fmt::Debug, IllegalAction>) -> InvalidOperation {
        match result {
            Err(IllegalAction::InvalidOperation(err)) => err,
            other => panic!("Expected an invalid operation, got {:?}", other),
        }
    }

    #[test]
    fn bad_insertion_then_early_move() {
        let mut game = Game::new(&GameConfig::default(), &mut StdRng::seed_from_u64(1)).unwrap();
        let err = game.select_insertion_position(pos(4, 5)).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = game.move_current_player(pos(4, 5)).unwrap_err();
        assert!(err.is_invalid_operation());
        assert_eq!(game.current_player().phase(), TurnPhase::Waiting);
        assert_eq!(game.board().last_insertion(), None);
    }

    #[test]
    fn moving_before_inserting_fails() {
        let mut game = two_player_game();
        assert_eq!(
            invalid_op(game.move_current_player(pos(0, 0))),
            InvalidOperation::NotReadyToMove {
                phase: TurnPhase::Waiting
            }
        );
        assert_eq!(
            invalid_op(game.pass()),
            InvalidOperation::NotReadyToMove {
                phase: TurnPhase::Waiting
            }
        );
        assert_eq!(
            invalid_op(game.end_turn()),
            InvalidOperation::TurnNotDone {
                phase: TurnPhase::Waiting
            }
        );
    }

    #[test]
    fn one_insertion_per_turn() {
        let mut game = two_player_game();
        game.select_insertion_position(pos(3, 0)).unwrap();
        assert_eq!(
            invalid_op(game.select_insertion_position(pos(5, 0))),
            InvalidOperation::NotWaiting {
                phase: TurnPhase::ReadyToMove
            }
        );
        assert!(game.rotate_spare().unwrap_err().is_invalid_operation());
        assert_eq!(game.board().last_insertion(), Some(pos(3, 0)));
    }

    #[test]
    fn rotating_the_spare() {
        let mut game = two_player_game();
        let before = *game.board().spare();
        game.rotate_spare().unwrap();
        assert_eq!(game.board().spare().rotation(), before.rotation().next());
        // The rotated spare is what goes in
        game.select_insertion_position(pos(3, 0)).unwrap();
        assert_eq!(game.board().tile_at(pos(3, 0)).to_string(), "┬");
    }

    #[test]
    fn unreachable_target_changes_nothing() {
        let mut game = two_player_game();
        game.select_insertion_position(pos(3, 0)).unwrap();
        let err = game.move_current_player(pos(3, 3)).unwrap_err();
        assert_eq!(
            err,
            IllegalAction::InvalidArgument(InvalidArgument::Unreachable {
                from: pos(0, 0),
                to: pos(3, 3)
            })
        );
        assert!(game.current_player().is_at(pos(0, 0)));
        assert_eq!(game.current_player().phase(), TurnPhase::ReadyToMove);
    }

    #[test]
    fn players_ride_along() {
        let mut red = Player::new(Color::Red, deck(&[Object::Owl]));
        red.move_to(pos(1, 3));
        let mut blue = Player::new(Color::Blue, deck(&[Object::Bat]));
        blue.move_to(pos(1, 6));
        let mut game = Game::from_parts(corridor_board(), vec![red, blue]).unwrap();

        let ejected = game.select_insertion_position(pos(1, 0)).unwrap();
        assert_eq!(ejected.to_string(), "─");
        assert!(game.players()[0].is_at(pos(1, 4)));
        // Blue stood on the tile that fell out and lands on the inserted one
        assert!(game.players()[1].is_at(pos(1, 0)));
        assert_eq!(game.board().tile_at(pos(1, 4)).objective(), Some(Object::Owl));
    }

    #[test]
    fn collect_objective_and_return_home() {
        let mut game = two_player_game();
        assert_eq!(game.board().spare().to_string(), "├");

        // Red links its corner to the corridor and walks to the owl
        game.select_insertion_position(pos(1, 0)).unwrap();
        assert!(game.reachable_positions().contains(pos(1, 4)));
        let outcome = game.move_current_player(pos(1, 4)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome {
                from: pos(0, 0),
                to: pos(1, 4),
                found: Some(Object::Owl),
                won: false,
            }
        );
        assert!(game.current_player().has_found_all_objectives());
        assert_eq!(game.end_turn().unwrap(), Color::Blue);

        game.select_insertion_position(pos(3, 0)).unwrap();
        let outcome = game.pass().unwrap();
        assert_eq!(outcome.from, outcome.to);
        assert_eq!(outcome.found, None);
        assert_eq!(game.end_turn().unwrap(), Color::Red);
        assert_eq!(game.current_player().phase(), TurnPhase::Waiting);

        game.select_insertion_position(pos(5, 0)).unwrap();
        let outcome = game.move_current_player(pos(0, 0)).unwrap();
        assert!(outcome.won);
        assert_eq!(game.winner(), Some(Color::Red));

        let game_over = InvalidOperation::GameOver { winner: Color::Red };
        assert_eq!(invalid_op(game.end_turn()), game_over);
        assert_eq!(invalid_op(game.rotate_spare()), game_over);
        assert_eq!(invalid_op(game.select_insertion_position(pos(3, 0))), game_over);
        assert_eq!(invalid_op(game.pass()), game_over);
    }

    #[test]
    fn reinsertion_is_blocked_across_turns() {
        let mut game = two_player_game();
        game.select_insertion_position(pos(0, 3)).unwrap();
        game.pass().unwrap();
        game.end_turn().unwrap();
        let err = game.select_insertion_position(pos(6, 3)).unwrap_err();
        assert_eq!(
            err,
            IllegalAction::InvalidArgument(InvalidArgument::ReversesLastInsertion {
                position: pos(6, 3)
            })
        );
        assert_eq!(game.current_player().phase(), TurnPhase::Waiting);
    }

    #[test]
    fn configuration() {
        let mut rng = StdRng::seed_from_u64(3);
        let setups = [(2, 24, 12), (3, 16, 5), (4, 18, 4), (3, 24, 8)];
        for (num_players, objective_count, per_player) in setups {
            let config = GameConfig {
                num_players,
                objective_count,
            };
            let game = Game::new(&config, &mut rng).unwrap();
            assert_eq!(game.players().len(), num_players);
            let mut dealt = BTreeSet::new();
            for (player, color) in game.players().iter().zip(Color::ALL) {
                assert_eq!(player.color(), color);
                assert!(player.is_at(color.home()));
                assert_eq!(player.objectives().len(), per_player);
                dealt.extend(player.objectives().cards().iter().map(|card| card.object));
            }
            assert_eq!(dealt.len(), num_players * per_player);
            assert_eq!(game.current_player().color(), Color::Red);
        }

        let bad = [
            (1, 24, InvalidArgument::PlayerCount { count: 1 }),
            (5, 24, InvalidArgument::PlayerCount { count: 5 }),
            (2, 15, InvalidArgument::ObjectiveCount { count: 15 }),
            (2, 25, InvalidArgument::ObjectiveCount { count: 25 }),
        ];
        for (num_players, objective_count, err) in bad {
            let config = GameConfig {
                num_players,
                objective_count,
            };
            assert_eq!(Game::new(&config, &mut rng).unwrap_err(), err);
        }
    }

    #[test]
    fn from_parts_checks_players() {
        let red = || Player::new(Color::Red, deck(&[Object::Owl]));
        assert_eq!(
            Game::from_parts(corridor_board(), vec![red()]).unwrap_err(),
            InvalidArgument::PlayerCount { count: 1 }
        );
        assert_eq!(
            Game::from_parts(corridor_board(), vec![red(), red()]).unwrap_err(),
            InvalidArgument::DuplicateColor { color: Color::Red }
        );
    }

    quickcheck! {
        // Random legal actions are always accepted, and the turn goes round in color order
        fn random_turns_follow_the_rules(seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = GameConfig { num_players: 3, objective_count: 24 };
            let mut game = Game::new(&config, &mut rng).unwrap();
            for turn in 0..30 {
                if game.is_over() {
                    break;
                }
                let expected = Color::ALL[turn % 3];
                if game.current_player().color() != expected {
                    return false;
                }
                let points = game.board().insertion_points();
                let Some(&point) = points.choose(&mut rng) else {
                    return false;
                };
                if game.select_insertion_position(point).is_err() {
                    return false;
                }
                let reachable: Vec<Position> = game.reachable_positions().into_iter().collect();
                let Some(&target) = reachable.choose(&mut rng) else {
                    return false;
                };
                let found_before = game.current_player().objectives().num_turned_over();
                let Ok(outcome) = game.move_current_player(target) else {
                    return false;
                };
                let found_after = game.current_player().objectives().num_turned_over();
                if found_after != found_before + usize::from(outcome.found.is_some()) {
                    return false;
                }
                if !outcome.won && game.end_turn().is_err() {
                    return false;
                }
            }
            true
        }
    }

    #[test]
    fn spare_tile_is_the_ejected_one() {
        let mut game = two_player_game();
        let ejected = game.select_insertion_position(pos(0, 5)).unwrap();
        assert_eq!(*game.board().spare(), ejected);
        assert_eq!(*game.board().tile_at(pos(0, 5)), tile!("├"));
    }
}
