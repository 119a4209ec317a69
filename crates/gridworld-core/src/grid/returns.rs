use crate::grid::trajectory::Transition;

/// Per-step discounted rewards `reward_t * gamma^t`, `t` starting at 0.
pub fn discounted_rewards(transitions: &[Transition], gamma: f64) -> Vec<f64> {
    let mut discount = 1.0;
    transitions
        .iter()
        .map(|transition| {
            let term = discount * transition.reward;
            discount *= gamma;
            term
        })
        .collect()
}

/// Discounted return of a logged trajectory, recomputed from scratch on every call.
pub fn discounted_return(transitions: &[Transition], gamma: f64) -> f64 {
    let mut total_return = 0.0;
    let mut discount = 1.0;

    for transition in transitions {
        total_return += discount * transition.reward;
        discount *= gamma;
    }

    total_return
}
