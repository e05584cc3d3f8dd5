use std::collections::BTreeSet;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationTier {
    Main,
    Side,
    Out,
}

/// Champions the player is practising, split in two disjoint tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rotation {
    main: BTreeSet<String>,
    side: BTreeSet<String>,
}

impl Rotation {
    /// Builds a rotation, removing from `side` any champion already in `main`.
    pub fn new<M, S>(main: M, side: S) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let main: BTreeSet<String> = main.into_iter().map(Into::into).collect();
        let mut side: BTreeSet<String> = side.into_iter().map(Into::into).collect();

        let overlap: Vec<String> = side.intersection(&main).cloned().collect();
        if !overlap.is_empty() {
            warn!(
                champions = ?overlap,
                "⚠️ Champions listed in both rotations, keeping them in the main rotation only"
            );
            side.retain(|champion| !main.contains(champion));
        }

        Self { main, side }
    }

    pub fn main(&self) -> &BTreeSet<String> {
        &self.main
    }

    pub fn side(&self) -> &BTreeSet<String> {
        &self.side
    }

    pub fn tier(&self, champion_name: &str) -> RotationTier {
        if self.main.contains(champion_name) {
            RotationTier::Main
        } else if self.side.contains(champion_name) {
            RotationTier::Side
        } else {
            RotationTier::Out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_champions_are_removed_from_side() {
        let rotation = Rotation::new(["Zeri", "Xayah", "Jhin"], ["Jhin", "Ziggs", "Zeri"]);

        assert!(rotation.side().is_disjoint(rotation.main()));
        assert_eq!(rotation.main().len(), 3);
        assert_eq!(
            rotation.side().iter().collect::<Vec<_>>(),
            vec!["Ziggs"]
        );
    }

    #[test]
    fn classifies_champions_into_tiers() {
        let rotation = Rotation::new(["Zeri"], ["Ziggs"]);

        assert_eq!(rotation.tier("Zeri"), RotationTier::Main);
        assert_eq!(rotation.tier("Ziggs"), RotationTier::Side);
        assert_eq!(rotation.tier("Ashe"), RotationTier::Out);
    }

    #[test]
    fn empty_rotation_puts_everything_out() {
        let rotation = Rotation::default();

        assert_eq!(rotation.tier("Zeri"), RotationTier::Out);
    }
}
