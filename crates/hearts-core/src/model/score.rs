use crate::model::player::PlayerPosition;

/// Every heart plus the queen of spades.
pub const TOTAL_PENALTY_POINTS: u32 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [u32; 4],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub const fn from_totals(totals: [u32; 4]) -> Self {
        Self { totals }
    }

    pub fn add_penalty(&mut self, seat: PlayerPosition, points: u32) {
        self.totals[seat.index()] += points;
    }

    pub fn add_totals(&mut self, totals: [u32; 4]) {
        for seat in PlayerPosition::LOOP {
            self.add_penalty(seat, totals[seat.index()]);
        }
    }

    pub fn score(&self, seat: PlayerPosition) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.totals
    }

    pub fn leading_player(&self) -> PlayerPosition {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .min_by_key(|seat| self.score(*seat))
            .unwrap_or(PlayerPosition::North)
    }

    /// Seat holding all 26 points, if any.
    pub fn moon_shooter(&self) -> Option<PlayerPosition> {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|seat| self.score(*seat) == TOTAL_PENALTY_POINTS)
    }

    /// Final hand scores: a shooter drops to zero and everyone else takes 26.
    pub fn settle(&self) -> [u32; 4] {
        shoot_the_moon(self.totals)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

pub fn shoot_the_moon(points: [u32; 4]) -> [u32; 4] {
    match points.iter().position(|&p| p == TOTAL_PENALTY_POINTS) {
        Some(shooter) => {
            let mut settled = [TOTAL_PENALTY_POINTS; 4];
            settled[shooter] = 0;
            settled
        }
        None => points,
    }
}
