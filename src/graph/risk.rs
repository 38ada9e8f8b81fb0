use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Shared-risk link group membership for edges.
///
/// An edge may belong to any number of groups. Edges absent from the profile
/// belong to none and are only disjoint from each other by identity.
#[derive(Debug, Clone)]
pub struct RiskProfile<E, G = u32>
where
    E: Eq + Hash,
    G: Ord,
{
    groups: HashMap<E, BTreeSet<G>>,
}

impl<E, G> RiskProfile<E, G>
where
    E: Eq + Hash + Clone,
    G: Ord + Clone + Debug,
{
    pub fn new() -> Self {
        RiskProfile {
            groups: HashMap::new(),
        }
    }

    /// Adds `edge` to `group`
    pub fn assign(&mut self, edge: E, group: G) -> &mut Self {
        self.groups.entry(edge).or_default().insert(group);
        self
    }

    /// Adds every edge of `edges` to `group`
    pub fn assign_all<I>(&mut self, edges: I, group: G) -> &mut Self
    where
        I: IntoIterator<Item = E>,
    {
        for edge in edges {
            self.assign(edge, group.clone());
        }
        self
    }

    /// Returns the groups an edge belongs to
    pub fn groups_of(&self, edge: &E) -> impl Iterator<Item = &G> {
        self.groups.get(edge).into_iter().flatten()
    }

    /// Returns true if the two edges are the same or share a group
    pub fn conflicts(&self, a: &E, b: &E) -> bool {
        if a == b {
            return true;
        }
        match (self.groups.get(a), self.groups.get(b)) {
            (Some(ga), Some(gb)) => !ga.is_disjoint(gb),
            _ => false,
        }
    }

    /// Union of the groups of all given edges
    pub fn groups_of_all<'a, I>(&'a self, edges: I) -> BTreeSet<G>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        edges
            .into_iter()
            .flat_map(|e| self.groups_of(e).cloned())
            .collect()
    }

    /// Returns true if the edge belongs to any of `groups`
    pub fn touches(&self, edge: &E, groups: &BTreeSet<G>) -> bool {
        self.groups_of(edge).any(|g| groups.contains(g))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<E, G> Default for RiskProfile<E, G>
where
    E: Eq + Hash + Clone,
    G: Ord + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, G> FromIterator<(E, G)> for RiskProfile<E, G>
where
    E: Eq + Hash + Clone,
    G: Ord + Clone + Debug,
{
    fn from_iter<I: IntoIterator<Item = (E, G)>>(iter: I) -> Self {
        let mut profile = RiskProfile::new();
        for (edge, group) in iter {
            profile.assign(edge, group);
        }
        profile
    }
}
