// Bounded history buffers - fixed-capacity rolling windows
use crate::domain::telemetry::Vector3;
use std::collections::VecDeque;

pub const CHART_CAPACITY: usize = 50;

/// FIFO window that evicts the oldest entry once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, returning the evicted entry if the window was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Rolling gyro chart. Labels and the three series are stored as one point
/// per slot, so they can never drift out of lockstep.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    points: BoundedHistory<ChartPoint>,
}

impl ChartSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: BoundedHistory::new(capacity),
        }
    }

    /// Record one gyro triple. Returns false (and records nothing) when the
    /// triple carries no axis at all.
    pub fn record(&mut self, label: String, gyro: &Vector3) -> bool {
        if !gyro.has_any() {
            return false;
        }
        self.points.push(ChartPoint {
            label,
            x: gyro.x.value_or_zero(),
            y: gyro.y.value_or_zero(),
            z: gyro.z.value_or_zero(),
        });
        true
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn series(&self, axis: GyroAxis) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| match axis {
                GyroAxis::X => p.x,
                GyroAxis::Y => p.y,
                GyroAxis::Z => p.z,
            })
            .collect()
    }

    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for ChartSeries {
    fn default() -> Self {
        Self::new(CHART_CAPACITY)
    }
}
