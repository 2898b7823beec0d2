/// Snapshot channels pushed from the engine to its observers.

use crate::entities::{GameState, PlayerState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    GameState,
    Player,
    Progress,
}

/// Handle returned on subscribe; pass it back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription {
    channel: Channel,
    id: u64,
}

impl Subscription {
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

type Slot<T> = Vec<(u64, Box<dyn FnMut(&T)>)>;

#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    game_state: Slot<GameState>,
    player: Slot<PlayerState>,
    progress: Slot<f64>,
}

impl Listeners {
    fn next(&mut self, channel: Channel) -> Subscription {
        self.next_id += 1;
        Subscription {
            channel,
            id: self.next_id,
        }
    }

    pub fn on_game_state(&mut self, f: impl FnMut(&GameState) + 'static) -> Subscription {
        let sub = self.next(Channel::GameState);
        self.game_state.push((sub.id, Box::new(f)));
        sub
    }

    pub fn on_player(&mut self, f: impl FnMut(&PlayerState) + 'static) -> Subscription {
        let sub = self.next(Channel::Player);
        self.player.push((sub.id, Box::new(f)));
        sub
    }

    pub fn on_progress(&mut self, f: impl FnMut(&f64) + 'static) -> Subscription {
        let sub = self.next(Channel::Progress);
        self.progress.push((sub.id, Box::new(f)));
        sub
    }

    /// Returns `false` if the handle was already released.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        fn remove<T>(slot: &mut Slot<T>, id: u64) -> bool {
            let before = slot.len();
            slot.retain(|(sid, _)| *sid != id);
            slot.len() != before
        }

        match sub.channel {
            Channel::GameState => remove(&mut self.game_state, sub.id),
            Channel::Player => remove(&mut self.player, sub.id),
            Channel::Progress => remove(&mut self.progress, sub.id),
        }
    }

    pub fn clear(&mut self) {
        self.game_state.clear();
        self.player.clear();
        self.progress.clear();
    }

    pub fn len(&self) -> usize {
        self.game_state.len() + self.player.len() + self.progress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn emit_game_state(&mut self, state: &GameState) {
        for (_, f) in &mut self.game_state {
            f(state);
        }
    }

    pub fn emit_player(&mut self, state: &PlayerState) {
        for (_, f) in &mut self.player {
            f(state);
        }
    }

    pub fn emit_progress(&mut self, progress: f64) {
        for (_, f) in &mut self.progress {
            f(&progress);
        }
    }
}
