use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Overflow is a machine invariant violation, not a program error:
/// it panics, and release builds abort. Underflow surfaces as an
/// internal error for the dispatch loop to report.
pub struct Stack<T> {
    overflow_message: &'static str,
    limit: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(limit: usize, overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            limit,
            vec: Vec::with_capacity(limit),
        }
    }

    fn underflow_error(&self) -> Error {
        error!(InternalError; "STACK UNDERFLOW")
    }

    pub fn clear(&mut self) {
        self.vec.clear()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.vec.last_mut()
    }

    pub fn push(&mut self, val: T) {
        if self.vec.len() >= self.limit {
            panic!("{} -- MAX {}", self.overflow_message, self.limit);
        }
        self.vec.push(val);
    }

    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }

    pub fn pop_2(&mut self) -> Result<(T, T)> {
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut stack: Stack<i32> = Stack::new(4, "TEST OVERFLOW");
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.pop_2().unwrap(), (2, 3));
        assert_eq!(stack.pop().unwrap(), 1);
        assert!(stack.pop().is_err());
    }

    #[test]
    #[should_panic(expected = "TEST OVERFLOW")]
    fn test_overflow_panics() {
        let mut stack: Stack<i32> = Stack::new(2, "TEST OVERFLOW");
        stack.push(1);
        stack.push(2);
        stack.push(3);
    }
}
