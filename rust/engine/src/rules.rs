use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// An action resolved against the acting seat's stack. Amounts are the chips
/// leaving the stack with this action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    pub fn paid(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n)
            | ValidatedAction::Bet(n)
            | ValidatedAction::Raise(n)
            | ValidatedAction::AllIn(n) => n,
        }
    }
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts a [`crate::player::PlayerAction`] into a [`ValidatedAction`]:
///
/// * a call is capped by the stack, and a short call becomes all-in;
///   calling with nothing to call is a check
/// * bet and raise sizes below `min_raise` are lifted to `min_raise`, the
///   call is added on top, and the total is capped by the stack
/// * a bet made while facing a bet is sized like a raise
///
/// # Errors
///
/// - [`GameError::CheckFacingBet`] - check while a bet is outstanding
/// - [`GameError::InsufficientChips`] - the seat has no chips left to act with
///
/// # Examples
///
/// ```
/// use parlor_engine::rules::{validate_action, ValidatedAction};
/// use parlor_engine::player::PlayerAction;
///
/// // Valid call with sufficient stack
/// let result = validate_action(1000, 50, 20, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::Call(50)));
///
/// // Raise below the minimum is lifted to it, then the call is added
/// let result = validate_action(1000, 50, 20, PlayerAction::Raise(5));
/// assert_eq!(result, Ok(ValidatedAction::Raise(70)));
///
/// // All-in when stack is insufficient for the full raise
/// let result = validate_action(60, 50, 20, PlayerAction::Raise(20));
/// assert_eq!(result, Ok(ValidatedAction::AllIn(60)));
/// ```
pub fn validate_action(
    stack: u32,
    to_call: u32,
    min_raise: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    if stack == 0 && action != A::Fold {
        return Err(GameError::InsufficientChips);
    }
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CheckFacingBet { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else if stack <= to_call {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Bet(size) | A::Raise(size) => {
            let wanted = to_call.saturating_add(size.max(min_raise));
            if wanted >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else if to_call == 0 {
                Ok(ValidatedAction::Bet(wanted))
            } else {
                Ok(ValidatedAction::Raise(wanted))
            }
        }
        A::AllIn => Ok(ValidatedAction::AllIn(stack)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_facing_bet_is_rejected() {
        assert_eq!(
            validate_action(100, 20, 20, A::Check),
            Err(GameError::CheckFacingBet { to_call: 20 })
        );
    }

    #[test]
    fn call_without_bet_is_a_check() {
        assert_eq!(validate_action(100, 0, 20, A::Call), Ok(ValidatedAction::Check));
    }

    #[test]
    fn short_call_goes_all_in() {
        assert_eq!(validate_action(15, 20, 20, A::Call), Ok(ValidatedAction::AllIn(15)));
        assert_eq!(validate_action(20, 20, 20, A::Call), Ok(ValidatedAction::AllIn(20)));
    }

    #[test]
    fn bet_is_lifted_to_min_raise() {
        assert_eq!(validate_action(500, 0, 20, A::Bet(5)), Ok(ValidatedAction::Bet(20)));
        assert_eq!(validate_action(500, 0, 20, A::Bet(45)), Ok(ValidatedAction::Bet(45)));
    }

    #[test]
    fn bet_facing_a_bet_sizes_like_a_raise() {
        assert_eq!(validate_action(500, 30, 20, A::Bet(20)), Ok(ValidatedAction::Raise(50)));
    }

    #[test]
    fn empty_stack_cannot_act_but_may_fold() {
        assert_eq!(validate_action(0, 0, 20, A::Check), Err(GameError::InsufficientChips));
        assert_eq!(validate_action(0, 10, 20, A::Fold), Ok(ValidatedAction::Fold));
    }

    #[test]
    fn paid_reports_chips_moved() {
        assert_eq!(ValidatedAction::Raise(70).paid(), 70);
        assert_eq!(ValidatedAction::Check.paid(), 0);
    }
}
