use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

/// Listens for `event` on the window and runs `callback` once the event has
/// stopped firing for `delay_ms`.
///
/// Returns `None` outside a browser. Dropping the listener also drops any
/// pending timeout, so the callback never runs after cleanup.
///
/// ```rust,ignore
/// use_effect_with(series.clone(), move |series| {
///     let listener = debounced_window_listener("resize", 150, move || redraw());
///     move || drop(listener)
/// });
/// ```
pub fn debounced_window_listener<F>(
    event: &'static str,
    delay_ms: u32,
    callback: F,
) -> Option<DebouncedListener>
where
    F: Fn() + 'static,
{
    let window = web_sys::window()?;
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let callback = Rc::new(callback);

    let listener = {
        let pending = pending.clone();
        EventListener::new(&window, event, move |_| {
            let cb = callback.clone();
            // Replacing the handle cancels the previous timeout
            *pending.borrow_mut() = Some(Timeout::new(delay_ms, move || cb()));
        })
    };

    Some(DebouncedListener {
        _listener: listener,
        _pending: pending,
    })
}

/// Keeps a debounced listener and its pending timeout alive
pub struct DebouncedListener {
    _listener: EventListener,
    _pending: Rc<RefCell<Option<Timeout>>>,
}
