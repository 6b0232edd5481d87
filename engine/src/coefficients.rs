//! Phase-dependent evaluation weights.
//!
//! Each heuristic component carries one weight per game phase. The presets
//! are trained weight sets, V1 being hand-written and the later versions
//! the product of successive tuning runs; V7 is the default.

use othello_core::Board;

/// Game phase, inferred from the number of discs on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
}

impl GamePhase {
    /// Fewer than 20 discs is the opening, 20 to 58 the midgame, more than
    /// 58 the endgame.
    pub fn of_board(board: &Board) -> GamePhase {
        let occupied = board.occupied();
        if occupied < 20 {
            GamePhase::Opening
        } else if occupied <= 58 {
            GamePhase::Midgame
        } else {
            GamePhase::Endgame
        }
    }

    fn index(self) -> usize {
        match self {
            GamePhase::Opening => 0,
            GamePhase::Midgame => 1,
            GamePhase::Endgame => 2,
        }
    }
}

/// Six weight vectors, one weight per phase, indexed
/// `[opening, midgame, endgame]`.
///
/// Read-only during a search; reconfiguring an engine takes `&mut` access,
/// so it can never race an in-flight search.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EvaluationCoefficients {
    pub name: String,
    pub material: [i32; 3],
    pub mobility: [i32; 3],
    pub corners: [i32; 3],
    pub parity: [i32; 3],
    pub stability: [i32; 3],
    pub frontier: [i32; 3],
}

impl EvaluationCoefficients {
    pub fn new(
        name: impl Into<String>,
        material: [i32; 3],
        mobility: [i32; 3],
        corners: [i32; 3],
        parity: [i32; 3],
        stability: [i32; 3],
        frontier: [i32; 3],
    ) -> Self {
        EvaluationCoefficients {
            name: name.into(),
            material,
            mobility,
            corners,
            parity,
            stability,
            frontier,
        }
    }

    /// The six weights for one phase, in component order
    /// (material, mobility, corners, parity, stability, frontier).
    pub fn for_phase(&self, phase: GamePhase) -> [i32; 6] {
        let i = phase.index();
        [
            self.material[i],
            self.mobility[i],
            self.corners[i],
            self.parity[i],
            self.stability[i],
            self.frontier[i],
        ]
    }

    pub fn v1() -> Self {
        Self::new(
            "V1",
            [0, 0, 1],
            [0, 0, 2],
            [100, 100, 100],
            [0, 0, 10],
            [0, 0, 0],
            [0, 0, 0],
        )
    }

    pub fn v2() -> Self {
        Self::new(
            "V2",
            [5, 5, 24],
            [7, 7, 18],
            [112, 112, 76],
            [10, 10, 0],
            [0, 0, 2],
            [0, 0, 9],
        )
    }

    pub fn v3() -> Self {
        Self::new(
            "V3",
            [0, 0, 1],
            [5, 5, 25],
            [100, 100, 100],
            [0, 0, 10],
            [0, 0, 10],
            [0, 0, 10],
        )
    }

    pub fn v4() -> Self {
        Self::new(
            "V4",
            [0, 0, 1],
            [6, 6, 20],
            [100, 100, 100],
            [7, 7, 29],
            [3, 3, 9],
            [7, 7, 8],
        )
    }

    pub fn v5() -> Self {
        Self::new(
            "V5",
            [1, 1, 1],
            [6, 6, 1],
            [66, 66, 81],
            [29, 29, 1],
            [1, 1, 9],
            [58, 58, 11],
        )
    }

    pub fn v6() -> Self {
        Self::new(
            "V6",
            [2, 2, 1],
            [21, 21, 5],
            [89, 89, 100],
            [45, 45, 9],
            [20, 20, 7],
            [67, 67, 12],
        )
    }

    pub fn v7() -> Self {
        Self::new(
            "V7",
            [1, 1, 1],
            [18, 33, 5],
            [87, 61, 100],
            [36, 39, 9],
            [23, 23, 4],
            [54, 66, 14],
        )
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "V1" => Some(Self::v1()),
            "V2" => Some(Self::v2()),
            "V3" => Some(Self::v3()),
            "V4" => Some(Self::v4()),
            "V5" => Some(Self::v5()),
            "V6" => Some(Self::v6()),
            "V7" => Some(Self::v7()),
            _ => None,
        }
    }
}

impl Default for EvaluationCoefficients {
    fn default() -> Self {
        Self::v7()
    }
}
