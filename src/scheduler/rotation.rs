use crate::model::Person;

/// Ordre circulaire fixe des personnes (indices dans le roster) + position
/// de départ du prochain passage.
#[derive(Debug, Clone)]
pub(super) struct Ring {
    order: Vec<usize>,
    offset: usize,
}

impl Ring {
    pub(super) fn new(order: Vec<usize>) -> Self {
        Self { order, offset: 0 }
    }

    /// Un passage complet : chaque membre exactement une fois, en partant de
    /// l'offset courant.
    pub(super) fn pass(&self) -> impl Iterator<Item = usize> + '_ {
        let len = self.order.len();
        (0..len).map(move |step| self.order[(self.offset + step) % len])
    }

    /// Clôt un passage : l'offset avance de `len` crans, le prochain passage
    /// repart donc du même membre.
    pub(super) fn complete_pass(&mut self) {
        let len = self.order.len();
        if len > 0 {
            self.offset = (self.offset + len) % len;
        }
    }
}

/// État de rotation d'une génération. Jamais réutilisé d'un appel à l'autre.
#[derive(Debug, Clone)]
pub(super) struct RosterState {
    pub(super) names: Vec<String>,
    pub(super) primary_ring: Ring,
    pub(super) secondary_ring: Ring,
    pub(super) last_primary: Option<usize>,
    pub(super) primary_counts: Vec<u32>,
    pub(super) secondary_counts: Vec<u32>,
}

impl RosterState {
    pub(super) fn new(roster: &[Person]) -> Self {
        let total = roster.len();
        Self {
            names: roster.iter().map(Person::full_name).collect(),
            primary_ring: Ring::new((0..total).collect()),
            secondary_ring: Ring::new((0..total).rev().collect()),
            last_primary: None,
            primary_counts: vec![0; total],
            secondary_counts: vec![0; total],
        }
    }
}

/// Parmi les candidats éligibles, celui qui a le compteur le plus bas ;
/// à égalité, le premier rencontré dans le passage.
pub(super) fn pick_least_loaded<I, F>(pass: I, counts: &[u32], mut eligible: F) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
    F: FnMut(usize) -> bool,
{
    let mut best: Option<usize> = None;
    for idx in pass {
        if !eligible(idx) {
            continue;
        }
        match best {
            Some(current) if counts[idx] >= counts[current] => {}
            _ => best = Some(idx),
        }
    }
    best
}
