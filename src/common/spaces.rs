use std::sync::{LazyLock, Mutex, MutexGuard};

use dyn_clone::DynClone;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::env::hfo::action::{HybridAction, NUM_ACTION_KINDS};

pub static SHARED_RNG: LazyLock<Mutex<StdRng>> =
    LazyLock::new(|| Mutex::new(StdRng::seed_from_u64(1234)));

fn shared_rng() -> MutexGuard<'static, StdRng> {
    // a panic while sampling leaves the rng itself intact
    SHARED_RNG.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn seed_spaces_rng(seed: u64) {
    *shared_rng() = StdRng::seed_from_u64(seed);
}

/// Defines a space in which a action, observation, or other may exist
pub trait Space<T: Clone>: DynClone {
    /// tests whether the sample is contained within the space
    fn contains(&self, sample: &T) -> bool;

    /// randomly samples from the space
    fn sample(&mut self) -> T;

    /// returns some semantic representation of the space of
    /// the space, to be used for initialising models
    fn shape(&self) -> T;
}

dyn_clone::clone_trait_object!(<T> Space<T> where T: Clone);

/// Defines a Discrete Space.
///
/// A Discrete space is a space on `usize` where samples
/// are drawn uniformly from `[0, n)`.
#[derive(Debug, Clone)]
pub struct Discrete {
    /// The upper bound on the space
    n: usize,
}

impl From<usize> for Discrete {
    fn from(value: usize) -> Self {
        Self { n: value }
    }
}

impl Space<usize> for Discrete {
    fn contains(&self, sample: &usize) -> bool {
        *sample < self.n
    }

    fn sample(&mut self) -> usize {
        shared_rng().gen_range(0..self.n)
    }

    fn shape(&self) -> usize {
        self.n
    }
}

/// Defines a `BoxSpace<T>`.
///
/// A `BoxSpace` is an n-dimensional container on
/// some generic `T`, where `T` is classically some
/// form of number. Observations and action parameter
/// blocks both use `Vec<f32>`.
#[derive(Debug, Clone)]
pub struct BoxSpace<T> {
    /// The lower bound on the space
    low: T,

    /// The upper bound on the space
    high: T,
}

impl From<(Vec<f32>, Vec<f32>)> for BoxSpace<Vec<f32>> {
    fn from(value: (Vec<f32>, Vec<f32>)) -> Self {
        Self {
            low: value.0,
            high: value.1,
        }
    }
}

impl Space<Vec<f32>> for BoxSpace<Vec<f32>> {
    fn contains(&self, sample: &Vec<f32>) -> bool {
        self.contains_slice(sample)
    }

    fn sample(&mut self) -> Vec<f32> {
        let mut rng = shared_rng();
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(&l, &h)| rng.gen_range(l..=h))
            .collect()
    }

    fn shape(&self) -> Vec<f32> {
        self.low.clone()
    }
}

impl BoxSpace<Vec<f32>> {
    /// A box of `len` dimensions sharing the same scalar bounds.
    pub fn uniform(len: usize, low: f32, high: f32) -> Self {
        Self::from((vec![low; len], vec![high; len]))
    }

    pub fn low(&self) -> &Vec<f32> {
        &self.low
    }

    pub fn high(&self) -> &Vec<f32> {
        &self.high
    }

    pub fn len(&self) -> usize {
        self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }

    pub fn contains_slice(&self, sample: &[f32]) -> bool {
        if sample.len() != self.low.len() {
            return false;
        }

        sample
            .iter()
            .zip(self.low.iter())
            .zip(self.high.iter())
            .all(|((&s, &l), &h)| l <= s && s <= h)
    }
}

/// The goalie's parameterised action space: a selector over the
/// action kinds paired with one parameter box per parameterised kind.
///
/// Every sample carries values for all blocks; only the block matching
/// the selector is read when the action is dispatched.
#[derive(Debug, Clone)]
pub struct HybridActionSpace {
    kind: Discrete,
    dash: BoxSpace<Vec<f32>>,
    turn: BoxSpace<Vec<f32>>,
    kick: BoxSpace<Vec<f32>>,
    tackle: BoxSpace<Vec<f32>>,
}

impl Default for HybridActionSpace {
    fn default() -> Self {
        Self {
            kind: Discrete::from(NUM_ACTION_KINDS),
            dash: BoxSpace::from((vec![0.0, -180.0], vec![100.0, 180.0])),
            turn: BoxSpace::from((vec![-180.0], vec![180.0])),
            kick: BoxSpace::from((vec![0.0, -180.0], vec![100.0, 180.0])),
            tackle: BoxSpace::from((vec![0.0], vec![100.0])),
        }
    }
}

impl HybridActionSpace {
    pub fn kind(&self) -> &Discrete {
        &self.kind
    }

    pub fn dash(&self) -> &BoxSpace<Vec<f32>> {
        &self.dash
    }

    pub fn turn(&self) -> &BoxSpace<Vec<f32>> {
        &self.turn
    }

    pub fn kick(&self) -> &BoxSpace<Vec<f32>> {
        &self.kick
    }

    pub fn tackle(&self) -> &BoxSpace<Vec<f32>> {
        &self.tackle
    }
}

impl Space<HybridAction> for HybridActionSpace {
    fn contains(&self, sample: &HybridAction) -> bool {
        self.kind.contains(&sample.kind)
            && self.dash.contains_slice(&sample.dash)
            && self.turn.contains_slice(&sample.turn)
            && self.kick.contains_slice(&sample.kick)
            && self.tackle.contains_slice(&sample.tackle)
    }

    fn sample(&mut self) -> HybridAction {
        let dash = self.dash.sample();
        let turn = self.turn.sample();
        let kick = self.kick.sample();
        let tackle = self.tackle.sample();

        HybridAction {
            kind: self.kind.sample(),
            dash: [dash[0], dash[1]],
            turn: [turn[0]],
            kick: [kick[0], kick[1]],
            tackle: [tackle[0]],
        }
    }

    /// The number of action kinds together with the upper bound of each block.
    fn shape(&self) -> HybridAction {
        HybridAction {
            kind: self.kind.shape(),
            dash: [self.dash.high[0], self.dash.high[1]],
            turn: [self.turn.high[0]],
            kick: [self.kick.high[0], self.kick.high[1]],
            tackle: [self.tackle.high[0]],
        }
    }
}

#[cfg(test)]
mod test {
    use crate::common::spaces::{BoxSpace, Discrete, HybridActionSpace, Space};
    use crate::env::hfo::action::HybridAction;

    #[test]
    fn test_discrete_space() {
        let mut space = Discrete::from(2);

        assert_eq!(space.shape(), 2);
        assert!(space.contains(&0));
        assert!(space.contains(&1));
        assert!(!space.contains(&2));

        let sample = space.sample();
        assert!((sample == 0) | (sample == 1))
    }

    #[test]
    fn test_box_f32_space() {
        let low = vec![0.0, -0.1, 0.1];
        let high = vec![1.0, 1.1, 0.9];

        let mut space = BoxSpace::from((low, high));

        assert_eq!(space.shape().len(), 3);

        assert!(space.contains(&vec![0.0, 1.1, 0.3]));
        assert!(!space.contains(&vec![30.0, 1.1, 0.3]));
        assert!(!space.contains(&vec![0.5, 0.5]));

        let sample = space.sample();
        assert!(sample.len() == 3);
        assert!(space.contains(&sample));
    }

    #[test]
    fn test_uniform_box() {
        let space = BoxSpace::uniform(4, -1.0, 1.0);

        assert_eq!(space.len(), 4);
        assert!(space.contains(&vec![-1.0, 0.0, 0.5, 1.0]));
        assert!(!space.contains(&vec![-1.0, 0.0, 0.5, 1.5]));
    }

    #[test]
    fn test_hybrid_action_space_bounds() {
        let space = HybridActionSpace::default();

        assert_eq!(space.kind().shape(), 5);
        assert_eq!(space.dash().low(), &vec![0.0, -180.0]);
        assert_eq!(space.dash().high(), &vec![100.0, 180.0]);
        assert_eq!(space.turn().low(), &vec![-180.0]);
        assert_eq!(space.kick().high(), &vec![100.0, 180.0]);
        assert_eq!(space.tackle().low(), &vec![0.0]);
        assert_eq!(space.tackle().high(), &vec![100.0]);

        let dash = HybridAction {
            kind: 0,
            dash: [50.0, 0.0],
            turn: [0.0],
            kick: [50.0, 0.0],
            tackle: [50.0],
        };
        assert!(space.contains(&dash));
        assert!(!space.contains(&HybridAction { kind: 5, ..dash }));
        assert!(!space.contains(&HybridAction {
            kick: [150.0, 0.0],
            ..dash
        }));
    }

    #[test]
    fn test_hybrid_action_space_samples_are_contained() {
        let mut space = HybridActionSpace::default();

        for _ in 0..100 {
            let sample = space.sample();
            assert!(space.contains(&sample));
        }
    }

    #[test]
    fn test_boxed_space_clones() {
        let space: Box<dyn Space<Vec<f32>>> = Box::new(BoxSpace::uniform(3, -1.0, 1.0));
        let cloned = space.clone();

        assert_eq!(cloned.shape(), vec![-1.0; 3]);
    }
}
