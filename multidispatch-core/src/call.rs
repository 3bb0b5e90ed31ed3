//! The argument shape seen by dispatch functions and methods.
//!
//! A [`Call`] carries the call arguments and, when the table passes context,
//! the enclosing object the table was invoked on. The dispatch function
//! borrows the call; the selected method then receives it by value, so both
//! always observe the same shape.

/// Arguments of one invocation, optionally prefixed by a context object.
#[derive(Debug)]
pub struct Call<'c, C, A> {
    context: Option<&'c C>,
    args: A,
}

impl<'c, C, A> Call<'c, C, A> {
    /// Create a call. Tables build these themselves; this is mostly useful
    /// for calling a registered [`Method`](crate::Method) directly.
    pub fn new(context: Option<&'c C>, args: A) -> Self {
        Self { context, args }
    }

    /// Create a call without context.
    pub fn bare(args: A) -> Self {
        Self {
            context: None,
            args,
        }
    }

    /// The context object, present only if the table passes context and the
    /// invocation supplied one.
    pub fn context(&self) -> Option<&'c C> {
        self.context
    }

    /// The call arguments.
    pub fn args(&self) -> &A {
        &self.args
    }

    /// Take the call arguments.
    pub fn into_args(self) -> A {
        self.args
    }

    /// Split into context and arguments.
    pub fn into_parts(self) -> (Option<&'c C>, A) {
        (self.context, self.args)
    }
}

impl<C, A: Clone> Clone for Call<'_, C, A> {
    fn clone(&self) -> Self {
        Self {
            context: self.context,
            args: self.args.clone(),
        }
    }
}
