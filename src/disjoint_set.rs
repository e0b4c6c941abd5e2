// https://en.wikipedia.org/wiki/Disjoint-set_data_structure
// Weighted quick-union without path compression, so lookups stay `&self`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
	parent: Vec<usize>,
	tree_size: Vec<usize>,
	components: usize,
}

impl DisjointSet {
	pub fn make_singletons(size: usize) -> DisjointSet {
		DisjointSet {
			parent: (0..size).collect(),
			tree_size: vec![1; size],
			components: size,
		}
	}

	pub fn len(&self) -> usize {
		self.parent.len()
	}

	pub fn component_count(&self) -> usize {
		self.components
	}

	pub fn find(&self, x: usize) -> usize {
		let mut x = x;
		while self.parent[x] != x {
			x = self.parent[x];
		}
		x
	}

	pub fn connected(&self, x: usize, y: usize) -> bool {
		self.find(x) == self.find(y)
	}

	pub fn component_size(&self, x: usize) -> usize {
		self.tree_size[self.find(x)]
	}

	// ties hang y's tree under x's root
	pub fn union(&mut self, x: usize, y: usize) {
		let x_root = self.find(x);
		let y_root = self.find(y);
		if x_root == y_root {
			return;
		}
		if self.tree_size[x_root] < self.tree_size[y_root] {
			self.parent[x_root] = y_root;
			self.tree_size[y_root] += self.tree_size[x_root];
		} else {
			self.parent[y_root] = x_root;
			self.tree_size[x_root] += self.tree_size[y_root];
		}
		self.components -= 1;
	}
}

#[cfg(test)]
mod tests {
	use super::DisjointSet;

	#[test]
	fn singletons_are_their_own_roots() {
		let ds = DisjointSet::make_singletons(5);
		assert_eq!(ds.len(), 5);
		assert_eq!(ds.component_count(), 5);
		for x in 0..5 {
			assert_eq!(ds.find(x), x);
			assert_eq!(ds.component_size(x), 1);
		}
		assert!(!ds.connected(0, 1));
	}

	#[test]
	fn tie_attaches_second_under_first() {
		let mut ds = DisjointSet::make_singletons(4);
		ds.union(2, 3);
		assert_eq!(ds.find(3), 2);
		ds.union(0, 1);
		ds.union(0, 2);
		assert_eq!(ds.find(2), 0);
		assert_eq!(ds.find(3), 0);
		assert_eq!(ds.component_size(3), 4);
	}

	#[test]
	fn smaller_tree_goes_under_larger() {
		let mut ds = DisjointSet::make_singletons(5);
		ds.union(1, 2);
		ds.union(1, 3);
		// 0 is alone, so the three-element tree rooted at 1 absorbs it
		ds.union(0, 1);
		assert_eq!(ds.find(0), 1);
		assert_eq!(ds.component_size(0), 4);
		assert_eq!(ds.component_size(4), 1);
	}

	#[test]
	fn redundant_union_is_noop() {
		let mut ds = DisjointSet::make_singletons(3);
		ds.union(0, 1);
		ds.union(1, 0);
		ds.union(0, 0);
		assert_eq!(ds.component_count(), 2);
		assert_eq!(ds.component_size(1), 2);
		assert!(ds.connected(1, 0));
		assert!(!ds.connected(2, 0));
	}

	#[test]
	fn chain_of_unions_is_transitive() {
		let mut ds = DisjointSet::make_singletons(10);
		for x in 0..9 {
			ds.union(x, x + 1);
		}
		assert_eq!(ds.component_count(), 1);
		assert!(ds.connected(0, 9));
		assert_eq!(ds.component_size(5), 10);
	}
}
