use snake_arcade_common::arcade::{ArcadeGameState, Direction, InputSource};

pub struct ScriptedInput {
    moves: Vec<Option<Direction>>,
    position: usize,
}

impl ScriptedInput {
    /// Parses `U`, `D`, `L`, `R` per tick; `.` means no input for that tick.
    pub fn parse(script: &str) -> Result<Self, String> {
        let moves = script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '.' => Ok(None),
                _ => Direction::from_char(c)
                    .map(Some)
                    .ok_or_else(|| format!("Unknown direction '{}' in script", c)),
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(Self { moves, position: 0 })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &ArcadeGameState) -> Option<Direction> {
        let next = self.moves.get(self.position).copied().flatten();
        self.position += 1;
        next
    }
}
