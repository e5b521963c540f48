//! Next-bout pairing: human vs human, then human vs CPU, then CPU vs CPU

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::ParticipantId;
use crate::tournament::participant::Participant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub east: ParticipantId,
    pub west: ParticipantId,
}

/// Pick two entrants from `available`, or `None` with fewer than two.
/// A lone human always takes the east corner.
pub fn pick_pairing<R: Rng + ?Sized>(available: &[&Participant], rng: &mut R) -> Option<Pairing> {
    if available.len() < 2 {
        return None;
    }

    let (humans, cpus): (Vec<&Participant>, Vec<&Participant>) =
        available.iter().copied().partition(|p| !p.is_cpu());

    let (east, west) = match humans.len() {
        0 => draw_two(&cpus, rng)?,
        1 => (humans[0], *cpus.choose(rng)?),
        _ => draw_two(&humans, rng)?,
    };

    Some(Pairing {
        east: east.id.clone(),
        west: west.id.clone(),
    })
}

fn draw_two<'a, R: Rng + ?Sized>(
    pool: &[&'a Participant],
    rng: &mut R,
) -> Option<(&'a Participant, &'a Participant)> {
    let mut picked = pool.choose_multiple(rng, 2);
    let east = *picked.next()?;
    let west = *picked.next()?;
    Some((east, west))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bout::phase::SignatureMove;
    use crate::bout::wrestler::WrestlerBuild;
    use crate::tournament::roster::create_cpu_participant;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn human(id: &str) -> Participant {
        Participant::human(id, id, "Rikishi", WrestlerBuild::balanced(SignatureMove::Yorikiri))
            .unwrap()
    }

    fn cpu(index: usize) -> Participant {
        create_cpu_participant(index, &BTreeSet::new())
    }

    #[test]
    fn test_humans_paired_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let field = [human("a@dohyo"), cpu(0), human("b@dohyo"), cpu(1)];
        let available: Vec<&Participant> = field.iter().collect();

        for _ in 0..20 {
            let pairing = pick_pairing(&available, &mut rng).unwrap();
            assert!(!pairing.east.as_str().starts_with("cpu_"));
            assert!(!pairing.west.as_str().starts_with("cpu_"));
            assert_ne!(pairing.east, pairing.west);
        }
    }

    #[test]
    fn test_lone_human_faces_cpu() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let field = [cpu(0), human("a@dohyo"), cpu(1)];
        let available: Vec<&Participant> = field.iter().collect();

        let pairing = pick_pairing(&available, &mut rng).unwrap();
        assert_eq!(pairing.east.as_str(), "a@dohyo");
        assert!(pairing.west.as_str().starts_with("cpu_"));
    }

    #[test]
    fn test_cpus_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let field = [cpu(0), cpu(1), cpu(2)];
        let available: Vec<&Participant> = field.iter().collect();

        let pairing = pick_pairing(&available, &mut rng).unwrap();
        assert_ne!(pairing.east, pairing.west);
    }

    #[test]
    fn test_needs_two_entrants() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let field = [human("a@dohyo")];
        let available: Vec<&Participant> = field.iter().collect();
        assert!(pick_pairing(&available, &mut rng).is_none());
    }
}
