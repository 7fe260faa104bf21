use core::fmt::Debug;

use tracing::debug;

use crate::{
    common::utils::mean,
    env::base::{Env, EnvError, InfoData},
};

/// Outcome of a single finished episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeStats {
    pub ret: f32,
    pub len: usize,
    /// The `status` info entry reported on the final step, if any.
    pub status: String,
}

pub struct EvalResult {
    pub mean_len: f32,
    pub mean_reward: f32,
}

impl From<&[EpisodeStats]> for EvalResult {
    fn from(value: &[EpisodeStats]) -> Self {
        let lens: Vec<f32> = value.iter().map(|s| s.len as f32).collect();
        let rets: Vec<f32> = value.iter().map(|s| s.ret).collect();

        EvalResult {
            mean_len: mean(&lens),
            mean_reward: mean(&rets),
        }
    }
}

/// Plays `n_episodes` full episodes, choosing each action with `policy`.
///
/// `on_episode` is called as each episode finishes. Any environment error
/// ends the run and is returned as is.
pub fn run_episodes<E, O, A, P, F>(
    env: &mut E,
    n_episodes: usize,
    mut policy: P,
    mut on_episode: F,
) -> Result<Vec<EpisodeStats>, EnvError>
where
    E: Env<O, A> + ?Sized,
    O: Clone + Debug,
    A: Clone + Debug,
    P: FnMut(&O) -> A,
    F: FnMut(&EpisodeStats),
{
    let mut episodes = Vec::with_capacity(n_episodes);

    while episodes.len() < n_episodes {
        let mut state = env.reset(None, None)?;
        let mut running_reward = 0.0;
        let mut ep_len = 0;

        loop {
            let action = policy(&state);
            let step_sample = env.step(&action)?;

            running_reward += step_sample.reward;
            ep_len += 1;

            if step_sample.done() {
                let status = match step_sample.info.get("status") {
                    Some(InfoData::String(s)) => s.clone(),
                    _ => String::new(),
                };
                debug!(
                    "episode {} finished after {} steps: {} ({})",
                    episodes.len(),
                    ep_len,
                    running_reward,
                    status
                );

                let stats = EpisodeStats {
                    ret: running_reward,
                    len: ep_len,
                    status,
                };
                on_episode(&stats);
                episodes.push(stats);
                break;
            }

            state = step_sample.obs;
        }
    }

    Ok(episodes)
}
