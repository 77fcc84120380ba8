/// The result of judging a hit object or one of its nested parts.
///
/// The variant order matters: several classifications are defined as ranges
/// over it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitResult {
    /// No result has been assigned yet.
    #[default]
    None,
    /// The object was missed.
    Miss,
    /// The worst possible hit.
    Meh,
    /// An okay hit (100 in osu!standard).
    Ok,
    /// A good hit (200 in osu!mania).
    Good,
    /// A great hit (300 in osu!standard).
    Great,
    /// The best hit in osu!mania.
    Perfect,
    /// A missed tick that does not affect combo.
    SmallTickMiss,
    /// A hit tick that does not affect combo.
    SmallTickHit,
    /// A missed tick that breaks combo.
    LargeTickMiss,
    /// A hit tick that increases combo.
    LargeTickHit,
    /// A small bonus, e.g. a spinner tick.
    SmallBonus,
    /// A large bonus, e.g. a spinner bonus tick.
    LargeBonus,
    /// A miss that is neither scored nor affects combo.
    IgnoreMiss,
    /// A hit that is neither scored nor affects combo.
    IgnoreHit,
}

impl HitResult {
    /// Amount of variants.
    pub const COUNT: usize = 15;

    /// All variants in their declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::None,
        Self::Miss,
        Self::Meh,
        Self::Ok,
        Self::Good,
        Self::Great,
        Self::Perfect,
        Self::SmallTickMiss,
        Self::SmallTickHit,
        Self::LargeTickMiss,
        Self::LargeTickHit,
        Self::SmallBonus,
        Self::LargeBonus,
        Self::IgnoreMiss,
        Self::IgnoreHit,
    ];

    /// Position of the variant inside [`HitResult::ALL`].
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Whether the result increases or breaks the combo.
    pub const fn affects_combo(self) -> bool {
        matches!(
            self,
            Self::Miss
                | Self::Meh
                | Self::Ok
                | Self::Good
                | Self::Great
                | Self::Perfect
                | Self::LargeTickHit
                | Self::LargeTickMiss
        )
    }

    /// Whether the result is taken into account for accuracy.
    pub const fn affects_accuracy(self) -> bool {
        self.is_scorable() && !self.is_bonus()
    }

    /// Whether the result belongs to a basic object, i.e. neither a tick nor
    /// a bonus.
    pub const fn is_basic(self) -> bool {
        self.is_scorable() && !self.is_tick() && !self.is_bonus()
    }

    /// Whether the result belongs to a tick.
    pub const fn is_tick(self) -> bool {
        matches!(
            self,
            Self::SmallTickHit | Self::SmallTickMiss | Self::LargeTickHit | Self::LargeTickMiss
        )
    }

    /// Whether the result is a bonus.
    pub const fn is_bonus(self) -> bool {
        matches!(self, Self::SmallBonus | Self::LargeBonus)
    }

    /// Whether the result counts as a successful hit.
    pub const fn is_hit(self) -> bool {
        !matches!(
            self,
            Self::None | Self::IgnoreMiss | Self::Miss | Self::SmallTickMiss | Self::LargeTickMiss
        )
    }

    /// Whether the result is relevant for scoring at all.
    pub const fn is_scorable(self) -> bool {
        let ordinal = self.ordinal();

        ordinal >= Self::Miss.ordinal() && ordinal < Self::IgnoreMiss.ordinal()
    }

    /// The numeric score value of the result.
    pub const fn base_score(self) -> u32 {
        match self {
            Self::SmallTickHit | Self::SmallBonus => 10,
            Self::LargeTickHit => 30,
            Self::Meh | Self::LargeBonus => 50,
            Self::Ok => 100,
            Self::Good => 200,
            Self::Great => 300,
            Self::Perfect => 315,
            Self::None
            | Self::Miss
            | Self::SmallTickMiss
            | Self::LargeTickMiss
            | Self::IgnoreMiss
            | Self::IgnoreHit => 0,
        }
    }
}
