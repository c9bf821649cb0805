//! Badge buttons.

/// The five physical buttons.
///
/// A, B and C are action buttons bound to the first three counters; Up and
/// Down page through the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    C,
    Up,
    Down,
}

impl Button {
    /// Action buttons in poll order.
    pub const ACTIONS: [Button; 3] = [Button::A, Button::B, Button::C];

    /// Index of the counter this button increments, if it is an action button.
    pub fn counter_index(self) -> Option<usize> {
        match self {
            Button::A => Some(0),
            Button::B => Some(1),
            Button::C => Some(2),
            Button::Up | Button::Down => None,
        }
    }
}

/// Result of polling the buttons once: at most one effect per wake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    Increment(usize),
    NextPage,
    PreviousPage,
}

/// Pick the single effect for this wake.
///
/// Action buttons win over navigation, A over B over C, Up over Down.
/// `is_pressed` is queried lazily in that order and polling stops at the
/// first hit. `mapped` says whether a counter index exists; an action
/// button without a counter is skipped.
pub fn poll(
    mut is_pressed: impl FnMut(Button) -> bool,
    mut mapped: impl FnMut(usize) -> bool,
) -> Option<InputEffect> {
    for button in Button::ACTIONS {
        if !is_pressed(button) {
            continue;
        }
        match button.counter_index() {
            Some(index) if mapped(index) => return Some(InputEffect::Increment(index)),
            _ => log::warn!("{:?} pressed but no counter is bound to it", button),
        }
    }

    if is_pressed(Button::Up) {
        return Some(InputEffect::NextPage);
    }
    if is_pressed(Button::Down) {
        return Some(InputEffect::PreviousPage);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(buttons: &[Button]) -> impl FnMut(Button) -> bool + '_ {
        move |b| buttons.contains(&b)
    }

    #[test]
    fn test_nothing_pressed() {
        assert_eq!(poll(pressed(&[]), |_| true), None);
    }

    #[test]
    fn test_action_priority() {
        assert_eq!(
            poll(pressed(&[Button::C, Button::B]), |_| true),
            Some(InputEffect::Increment(1))
        );
        assert_eq!(
            poll(pressed(&[Button::Down, Button::A, Button::Up]), |_| true),
            Some(InputEffect::Increment(0))
        );
    }

    #[test]
    fn test_up_beats_down() {
        assert_eq!(
            poll(pressed(&[Button::Down, Button::Up]), |_| true),
            Some(InputEffect::NextPage)
        );
        assert_eq!(
            poll(pressed(&[Button::Down]), |_| true),
            Some(InputEffect::PreviousPage)
        );
    }

    #[test]
    fn test_unbound_action_falls_through() {
        // Only one counter configured: C has nothing to increment.
        let only_first = |index: usize| index < 1;
        assert_eq!(poll(pressed(&[Button::C]), only_first), None);
        assert_eq!(
            poll(pressed(&[Button::C, Button::Down]), only_first),
            Some(InputEffect::PreviousPage)
        );
        assert_eq!(
            poll(pressed(&[Button::C, Button::A]), only_first),
            Some(InputEffect::Increment(0))
        );
    }

    #[test]
    fn test_polling_stops_at_first_hit() {
        let mut polled = std::vec::Vec::new();
        let effect = poll(
            |b| {
                polled.push(b);
                b == Button::B
            },
            |_| true,
        );
        assert_eq!(effect, Some(InputEffect::Increment(1)));
        assert_eq!(polled, [Button::A, Button::B]);
    }
}
