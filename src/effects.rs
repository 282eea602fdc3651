/// Decorative banners pushed to clients on notable events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    GameStart,
    CombatStart,
    Hit,
    Miss,
    Victory,
    Defeat,
}

impl Effect {
    pub fn banner(self) -> &'static str {
        match self {
            Effect::GameStart => concat!(
                "+--------------------------------------+\n",
                "|          OPPONENT FOUND              |\n",
                "|   place 5 ships with /set A1 ...     |\n",
                "+--------------------------------------+",
            ),
            Effect::CombatStart => concat!(
                "+--------------------------------------+\n",
                "|        ALL HANDS TO BATTLE!          |\n",
                "+--------------------------------------+",
            ),
            Effect::Hit => concat!(
                "      \\  |  /\n",
                "    --  HIT!  --\n",
                "      /  |  \\",
            ),
            Effect::Miss => concat!(
                "     ~ ~ ~ ~ ~\n",
                "    ~  SPLASH  ~\n",
                "     ~ ~ ~ ~ ~",
            ),
            Effect::Victory => concat!(
                "*****************************************\n",
                "*              VICTORY!                 *\n",
                "*   the enemy fleet rests on the floor  *\n",
                "*****************************************",
            ),
            Effect::Defeat => concat!(
                "-----------------------------------------\n",
                "               DEFEAT\n",
                "     your fleet has been destroyed\n",
                "-----------------------------------------",
            ),
        }
    }

    /// Effect for a resolved shot.
    pub fn for_shot(hit: bool) -> Effect {
        if hit {
            Effect::Hit
        } else {
            Effect::Miss
        }
    }
}
