use crate::alphabet::Marker;

/// Result of a push request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// The marker was already on top; the stack is unchanged.
    AlreadyActive,
}

/// The auxiliary LIFO of outstanding obligations.
///
/// A marker is never stacked directly on top of itself, so repeated section
/// openers cannot multiply the obligation count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    markers: Vec<Marker>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<Marker> {
        self.markers.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn push(&mut self, marker: Marker) -> PushOutcome {
        if self.top() == Some(marker) {
            PushOutcome::AlreadyActive
        } else {
            self.markers.push(marker);
            PushOutcome::Pushed
        }
    }

    /// Pops `expected` if it is on top. On mismatch the stack is left as is.
    pub fn pop(&mut self, expected: Marker) -> Result<Marker, StackMismatch> {
        match self.top() {
            Some(top) if top == expected => {
                self.markers.pop();
                Ok(top)
            }
            _ => Err(StackMismatch {
                expected,
                found: self.markers.clone(),
            }),
        }
    }

    /// Markers bottom to top.
    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    pub fn into_vec(self) -> Vec<Marker> {
        self.markers
    }
}

/// A pop that did not find its marker on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackMismatch {
    pub expected: Marker,
    pub found: Vec<Marker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_is_idempotent_on_top() {
        let mut stack = Stack::new();
        assert_eq!(stack.push(Marker::RoleMarker), PushOutcome::Pushed);
        assert_eq!(stack.push(Marker::RoleMarker), PushOutcome::AlreadyActive);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn same_marker_may_stack_when_not_on_top() {
        let mut stack = Stack::new();
        stack.push(Marker::RoleMarker);
        stack.push(Marker::PayMarker);
        assert_eq!(stack.push(Marker::RoleMarker), PushOutcome::Pushed);
        assert_eq!(
            stack.as_slice(),
            &[Marker::RoleMarker, Marker::PayMarker, Marker::RoleMarker]
        );
    }

    #[test]
    fn pop_requires_matching_top() {
        let mut stack = Stack::new();
        stack.push(Marker::RoleMarker);
        stack.push(Marker::PayMarker);

        let mismatch = stack.pop(Marker::RoleMarker).unwrap_err();
        assert_eq!(mismatch.expected, Marker::RoleMarker);
        assert_eq!(mismatch.found, vec![Marker::RoleMarker, Marker::PayMarker]);
        assert_eq!(stack.len(), 2);

        assert_eq!(stack.pop(Marker::PayMarker), Ok(Marker::PayMarker));
        assert_eq!(stack.pop(Marker::RoleMarker), Ok(Marker::RoleMarker));
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut stack = Stack::new();
        let mismatch = stack.pop(Marker::PayMarker).unwrap_err();
        assert!(mismatch.found.is_empty());
    }
}
