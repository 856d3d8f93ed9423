//! A reference counted maze handle for undo layers that keep one live maze per history
//! entry.
//!
//! Every duplicate sees the same maze, so a history layer stepping between entries must
//! push the stored position back in with `set_position`.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use log::trace;

use crate::errors::*;
use crate::generators::TargetPolicy;
use crate::maze::Maze;
use crate::navigation::{Move, Position, PositionUpdate};
use crate::view::View;


#[derive(Debug)]
pub struct SharedMaze(Rc<RefCell<Maze>>);

impl SharedMaze {
    pub fn new(x: u32,
               y: u32,
               z: u32,
               policy: TargetPolicy,
               double_routes: bool,
               seed: u64)
               -> Result<SharedMaze> {
        Ok(SharedMaze::from(Maze::new(x, y, z, policy, double_routes, seed)?))
    }

    /// Another handle onto the same maze.
    pub fn duplicate(&self) -> SharedMaze {
        let copy = SharedMaze(Rc::clone(&self.0));
        trace!("duplicated maze handle, {} handles", self.reference_count());
        copy
    }

    /// Give up this handle. The maze goes once the last handle is destroyed.
    pub fn destroy(self) {
        trace!("destroying maze handle, {} handles left", self.reference_count() - 1);
    }

    pub fn reference_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn borrow(&self) -> Ref<Maze> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<Maze> {
        self.0.borrow_mut()
    }

    /// An independent copy of the maze as it stands.
    pub fn snapshot(&self) -> Maze {
        self.0.borrow().clone()
    }

    pub fn make_move(&self, player_move: Move) -> bool {
        self.0.borrow_mut().make_move(player_move)
    }

    pub fn position(&self) -> Position {
        self.0.borrow().position()
    }

    pub fn set_position(&self, update: &PositionUpdate) -> Result<()> {
        self.0.borrow_mut().set_position(update)
    }

    pub fn view(&self) -> Result<View> {
        self.0.borrow().view()
    }

    pub fn mode(&self) -> i64 {
        self.0.borrow().mode()
    }

    pub fn set_mode(&self, mode: i64) {
        self.0.borrow_mut().set_mode(mode)
    }
}

impl From<Maze> for SharedMaze {
    fn from(maze: Maze) -> SharedMaze {
        SharedMaze(Rc::new(RefCell::new(maze)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> SharedMaze {
        SharedMaze::new(4, 4, 4, TargetPolicy::Corner, false, 8).unwrap()
    }

    #[test]
    fn duplicates_count_and_destroy() {
        let first = shared();
        assert_eq!(first.reference_count(), 1);
        let second = first.duplicate();
        let third = second.duplicate();
        assert_eq!(first.reference_count(), 3);
        second.destroy();
        assert_eq!(first.reference_count(), 2);
        assert_eq!(third.reference_count(), 2);
        third.destroy();
        assert_eq!(first.reference_count(), 1);
    }

    #[test]
    fn duplicates_alias_one_maze() {
        let first = shared();
        let second = first.duplicate();
        first.set_mode(4);
        assert_eq!(second.mode(), 4);
        first.make_move(Move::TurnLeft);
        first.make_move(Move::Mark);
        assert_eq!(second.position(), first.position());
        assert_eq!(second.borrow().marks(), 1);
    }

    #[test]
    fn undo_by_resynchronising() {
        let live = shared();
        let before = live.position();
        let history = live.duplicate();
        for m in [Move::TurnRight, Move::Forward, Move::PitchUp, Move::Forward, Move::Forward].iter() {
            live.make_move(*m);
        }
        assert_ne!(history.position(), before);

        history.set_position(&PositionUpdate::from(before)).unwrap();
        assert_eq!(live.position(), before);
        assert_eq!(live.view().unwrap(), history.view().unwrap());
    }

    #[test]
    fn snapshots_are_independent() {
        let live = shared();
        let snapshot = live.snapshot();
        live.make_move(Move::TurnAround);
        live.make_move(Move::Mark);
        assert_eq!(snapshot.marks(), 0);
        assert_eq!(snapshot.rotations(), 0);
        assert_ne!(*live.borrow(), snapshot);
    }
}
