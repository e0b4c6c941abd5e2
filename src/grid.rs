use crate::data::Site;
use crate::error::{PercolationError, Result};

/// Open/closed flags for an n x n grid, stored row-major.
#[derive(Debug, Clone)]
pub struct GridState {
    n: usize,
    open: Vec<bool>,
    open_count: usize,
}

impl GridState {
    pub fn new(n: usize) -> GridState {
        GridState {
            n,
            open: vec![false; n * n],
            open_count: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn validate(&self, row: isize, col: isize) -> Result<Site> {
        let n = self.n as isize;
        if row < 0 || row >= n || col < 0 || col >= n {
            return Err(PercolationError::IndexOutOfBounds { row, col, n: self.n });
        }
        Ok(Site { row: row as usize, col: col as usize })
    }

    pub fn index(&self, site: Site) -> usize {
        site.row * self.n + site.col
    }

    pub fn is_open_at(&self, row: isize, col: isize) -> Result<bool> {
        let site = self.validate(row, col)?;
        Ok(self.is_site_open(site))
    }

    pub fn is_site_open(&self, site: Site) -> bool {
        self.open[self.index(site)]
    }

    // returns true if the site was closed before this call
    pub fn set_open(&mut self, row: isize, col: isize) -> Result<bool> {
        let site = self.validate(row, col)?;
        let idx = self.index(site);
        if self.open[idx] {
            return Ok(false);
        }
        self.open[idx] = true;
        self.open_count += 1;
        Ok(true)
    }

    pub fn open_site_count(&self) -> usize {
        self.open_count
    }
}
