use std::fmt;

use pathfinding::prelude::bfs;

use crate::data::{Direction, Site};
use crate::disjoint_set::DisjointSet;
use crate::error::{PercolationError, Result};
use crate::grid::GridState;

/// An n x n grid of sites that water can flow through once opened.
///
/// Connectivity is tracked by a weighted quick-union over the n*n sites plus
/// two virtual sites: one above row 0 and one below row n-1. The grid
/// percolates when those two virtual sites are connected.
#[derive(Debug, Clone)]
pub struct Percolation {
    grid: GridState,
    uf: DisjointSet,
    virtual_top: usize,
    virtual_bottom: usize,
}

impl Percolation {
    pub fn new(n: usize) -> Result<Percolation> {
        if n == 0 {
            return Err(PercolationError::invalid_argument("grid size must be greater than 0"));
        }
        let sites = n.checked_mul(n)
            .filter(|s| s.checked_add(2).is_some())
            .ok_or_else(|| PercolationError::invalid_argument(format!("grid size {} is too large", n)))?;
        Ok(Percolation {
            grid: GridState::new(n),
            uf: DisjointSet::make_singletons(sites + 2),
            virtual_top: sites,
            virtual_bottom: sites + 1,
        })
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Opens the site at (row, col) and joins it with its open neighbours.
    /// Opening an already-open site does nothing.
    pub fn open(&mut self, row: isize, col: isize) -> Result<()> {
        if !self.grid.set_open(row, col)? {
            return Ok(());
        }
        let site = Site { row: row as usize, col: col as usize };
        let current = self.grid.index(site);
        let n = self.size();

        if site.row == 0 {
            self.uf.union(current, self.virtual_top);
        }
        if site.row == n - 1 {
            self.uf.union(current, self.virtual_bottom);
        }
        for neighbor in self.neighbors(site) {
            if self.grid.is_site_open(neighbor) {
                let other = self.grid.index(neighbor);
                self.uf.union(current, other);
            }
        }
        trace!("opened {} ({} open)", site, self.grid.open_site_count());
        Ok(())
    }

    pub fn is_open(&self, row: isize, col: isize) -> Result<bool> {
        self.grid.is_open_at(row, col)
    }

    /// True when the site is open and in the same component as the virtual
    /// top site. Both virtual sites share one union-find, so once the grid
    /// percolates every open site connected to the bottom row also reports
    /// full, even without its own path to the top ("backwash").
    pub fn is_full(&self, row: isize, col: isize) -> Result<bool> {
        let site = self.grid.validate(row, col)?;
        Ok(self.is_site_full(site))
    }

    pub fn percolates(&self) -> bool {
        self.uf.connected(self.virtual_top, self.virtual_bottom)
    }

    pub fn open_site_count(&self) -> usize {
        self.grid.open_site_count()
    }

    pub fn open_fraction(&self) -> f64 {
        let n = self.size();
        self.open_site_count() as f64 / (n * n) as f64
    }

    /// Shortest chain of adjacent open sites from the top row to the bottom
    /// row, or `None` if the grid does not percolate.
    pub fn spanning_path(&self) -> Option<Vec<Site>> {
        if !self.percolates() {
            return None;
        }
        let n = self.size();
        let path = bfs(
            &self.virtual_top,
            |&idx| self.successors(idx),
            |&idx| idx == self.virtual_bottom)?;
        debug!("spanning path of {} sites found", path.len() - 2);
        Some(path.into_iter()
            .filter(|&idx| idx < n * n)
            .map(|idx| Site { row: idx / n, col: idx % n })
            .collect())
    }

    fn is_site_full(&self, site: Site) -> bool {
        self.grid.is_site_open(site) && self.uf.connected(self.grid.index(site), self.virtual_top)
    }

    fn neighbors(&self, site: Site) -> Vec<Site> {
        let n = self.size() as isize;
        Direction::adjacent_directions().iter()
            .map(|d| d.offset())
            .map(|(dr, dc)| (site.row as isize + dr, site.col as isize + dc))
            .filter(|&(r, c)| r >= 0 && r < n && c >= 0 && c < n)
            .map(|(r, c)| Site { row: r as usize, col: c as usize })
            .collect()
    }

    // open-site adjacency for the path search, virtual sites included
    fn successors(&self, idx: usize) -> Vec<usize> {
        let n = self.size();
        if idx == self.virtual_top {
            return (0..n)
                .map(|col| Site { row: 0, col })
                .filter(|&s| self.grid.is_site_open(s))
                .map(|s| self.grid.index(s))
                .collect();
        }
        if idx == self.virtual_bottom {
            return vec![];
        }
        let site = Site { row: idx / n, col: idx % n };
        let mut out: Vec<usize> = self.neighbors(site).into_iter()
            .filter(|&s| self.grid.is_site_open(s))
            .map(|s| self.grid.index(s))
            .collect();
        if site.row == n - 1 {
            out.push(self.virtual_bottom);
        }
        out
    }
}

impl fmt::Display for Percolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.size();
        for row in 0..n {
            let line: String = (0..n)
                .map(|col| {
                    let site = Site { row, col };
                    if self.is_site_full(site) {
                        '~'
                    } else if self.grid.is_site_open(site) {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
