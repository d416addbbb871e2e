use super::prefix::Prefix;
use super::state::State;
use super::word::WordPool;

/// Multiplier of the polynomial prefix hash.
pub const HASH_MULTIPLIER: u32 = 31;

/// Stable handle of a state inside its [`StateTable`].
///
/// Handles are never invalidated: states are never removed or moved to
/// another handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

/// Hash table mapping each distinct prefix to its [`State`].
///
/// Collisions are resolved by chaining. The bucket count is fixed at
/// construction; chains simply grow with the vocabulary.
///
/// # Invariants
/// - At most one state exists per distinct prefix
/// - A state always lives in the chain of the bucket its prefix hashes to
#[derive(Clone, Debug)]
pub struct StateTable {
	/// Collision chains, each holding handles into `states`.
	buckets: Vec<Vec<StateId>>,
	/// Every state, in creation order.
	states: Vec<State>,
}

impl StateTable {
	/// Creates an empty table with `buckets` chains (at least one).
	pub fn new(buckets: usize) -> Self {
		Self {
			buckets: vec![Vec::new(); buckets.max(1)],
			states: Vec::new(),
		}
	}

	/// Polynomial hash folded over every byte of every prefix slot, in order.
	///
	/// `h = h * 31 + byte`, with 32-bit wrapping arithmetic.
	pub fn hash(prefix: &Prefix, pool: &WordPool) -> u32 {
		prefix
			.tokens()
			.iter()
			.flat_map(|token| token.bytes(pool))
			.fold(0u32, |h, byte| h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u32::from(*byte)))
	}

	/// Bucket index of `prefix`.
	pub fn bucket(&self, prefix: &Prefix, pool: &WordPool) -> usize {
		Self::hash(prefix, pool) as usize % self.buckets.len()
	}

	/// Looks up the state of `prefix` without creating it.
	///
	/// `None` is an ordinary outcome, not an error.
	pub fn find(&self, prefix: &Prefix, pool: &WordPool) -> Option<StateId> {
		self.buckets[self.bucket(prefix, pool)]
			.iter()
			.copied()
			.find(|id| self.states[id.0].prefix() == prefix)
	}

	/// Looks up the state of `prefix`, creating an empty one if missing.
	///
	/// A new state keeps its own copy of the window's token handles; the
	/// words themselves stay in the pool.
	pub fn find_or_insert(&mut self, prefix: &Prefix, pool: &WordPool) -> StateId {
		let bucket = self.bucket(prefix, pool);
		let chain = &self.buckets[bucket];
		if let Some(id) = chain.iter().copied().find(|id| self.states[id.0].prefix() == prefix) {
			return id;
		}

		let id = StateId(self.states.len());
		self.states.push(State::new(prefix.clone()));
		self.buckets[bucket].push(id);
		id
	}

	/// Returns the state behind a handle minted by this table.
	pub fn get(&self, id: StateId) -> &State {
		&self.states[id.0]
	}

	pub(crate) fn get_mut(&mut self, id: StateId) -> &mut State {
		&mut self.states[id.0]
	}

	/// Number of states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Number of buckets.
	pub fn bucket_count(&self) -> usize {
		self.buckets.len()
	}

	/// Length of the longest collision chain.
	pub fn longest_chain(&self) -> usize {
		self.buckets.iter().map(Vec::len).max().unwrap_or(0)
	}

	/// Iterates over every state, in creation order.
	pub fn iter(&self) -> impl Iterator<Item = &State> {
		self.states.iter()
	}
}
