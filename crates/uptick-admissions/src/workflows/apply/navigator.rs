/// Saturating cursor over the wizard pages.
///
/// `next` and `prev` never leave `1..=total_steps` and never consult the
/// validator; callers gate forward movement themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepNavigator {
    current_step: usize,
    total_steps: usize,
}

impl StepNavigator {
    pub fn new(total_steps: usize) -> Self {
        Self {
            current_step: 1,
            total_steps: total_steps.max(1),
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn next(&mut self) {
        if self.current_step < self.total_steps {
            self.current_step += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    pub fn reset(&mut self) {
        self.current_step = 1;
    }
}
