use crate::{
    foundation::error::{ParallaxError, ParallaxResult},
    host::collaborators::ImageResolver,
    render::schedule::RedrawQueue,
    stage::parallax::{CompositeFrame, ParallaxStage},
};

/// Upper bound on the ticks [`play_until`] is willing to replay.
pub const MAX_PLAYBACK_TICKS: u64 = 1_000_000;

/// Drive `stage` from `t = 0` at the cadence it requests, stopping at `until` seconds.
///
/// Every intermediate tick is applied, so the returned frame matches what a host redrawing on
/// schedule would show at `until`. A zero redraw interval jumps straight to `until`. Targets
/// needing more than [`MAX_PLAYBACK_TICKS`] ticks at the stage's redraw interval are rejected.
pub fn play_until<R: ImageResolver>(
    stage: &mut ParallaxStage<R>,
    queue: &mut RedrawQueue,
    until: f64,
) -> ParallaxResult<CompositeFrame<R::Texture>> {
    if !until.is_finite() || until < 0.0 {
        return Err(ParallaxError::configuration(format!(
            "playback target must be a finite time >= 0 (got {until})"
        )));
    }

    let interval = stage.redraw_interval();
    if interval > 0.0 && (until / interval).ceil() + 2.0 > MAX_PLAYBACK_TICKS as f64 {
        return Err(ParallaxError::configuration(format!(
            "playback target {until}s needs more than {MAX_PLAYBACK_TICKS} ticks at a \
             {interval}s redraw interval"
        )));
    }

    // Stale requests from before playback must not shorten the first step.
    queue.take();

    let mut t = 0.0;
    let mut ticks = 0u64;
    loop {
        let frame = stage.update(t, queue)?;
        ticks += 1;
        let step = queue.take().unwrap_or(interval);
        if t >= until {
            tracing::debug!(ticks, until, "playback reached target time");
            return Ok(frame);
        }
        if ticks >= MAX_PLAYBACK_TICKS {
            return Err(ParallaxError::configuration(format!(
                "playback stopped at {t}s after {ticks} ticks, short of {until}s"
            )));
        }
        let next = t + step;
        // A step too small to move `t` would never reach the target.
        t = if step > 0.0 && next > t { next.min(until) } else { until };
    }
}

/// Produce `count` consecutive frames starting at `t = 0`, spaced by the requested cadence.
///
/// `on_frame` receives the 0-based frame number and the frame.
pub fn play_frames<R, F>(
    stage: &mut ParallaxStage<R>,
    queue: &mut RedrawQueue,
    count: usize,
    mut on_frame: F,
) -> ParallaxResult<()>
where
    R: ImageResolver,
    F: FnMut(usize, &CompositeFrame<R::Texture>) -> ParallaxResult<()>,
{
    queue.take();
    let mut t = 0.0;
    for n in 0..count {
        let frame = stage.update(t, queue)?;
        on_frame(n, &frame)?;
        t += queue.take().unwrap_or(stage.redraw_interval());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/stage/playback.rs"]
mod tests;
