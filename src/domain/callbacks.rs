use crate::domain::Response;

/// Caller-supplied decisions for a poll session.
///
/// `E` is the transport's error type. `is_condition_met` only ever sees
/// responses; transport failures go straight to `on_error`.
pub trait PollCallbacks<E> {
    type Output;
    type Rejection;

    fn is_condition_met(&mut self, response: &Response) -> bool;

    /// Turns the satisfying response into the session's result.
    fn on_condition_met(&mut self, response: Response) -> Self::Output;

    /// Turns a transport failure into the session's rejection.
    fn on_error(&mut self, error: E) -> Self::Rejection;
}

/// [`PollCallbacks`] made of three closures. Build with [`callbacks`].
#[derive(Debug, Clone)]
pub struct FnCallbacks<ConditionMet, Callback, HandleError> {
    condition_met: ConditionMet,
    callback: Callback,
    handle_error: HandleError,
}

pub fn callbacks<ConditionMet, Callback, HandleError>(
    condition_met: ConditionMet,
    callback: Callback,
    handle_error: HandleError,
) -> FnCallbacks<ConditionMet, Callback, HandleError> {
    FnCallbacks {
        condition_met,
        callback,
        handle_error,
    }
}

impl<E, R, X, ConditionMet, Callback, HandleError> PollCallbacks<E>
    for FnCallbacks<ConditionMet, Callback, HandleError>
where
    ConditionMet: FnMut(&Response) -> bool,
    Callback: FnMut(Response) -> R,
    HandleError: FnMut(E) -> X,
{
    type Output = R;
    type Rejection = X;

    fn is_condition_met(&mut self, response: &Response) -> bool {
        (self.condition_met)(response)
    }

    fn on_condition_met(&mut self, response: Response) -> R {
        (self.callback)(response)
    }

    fn on_error(&mut self, error: E) -> X {
        (self.handle_error)(error)
    }
}
