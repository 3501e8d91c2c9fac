use super::super::Cpu;

/// Progress of an EI towards setting IME.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::cpu) enum ImeSchedule {
    #[default]
    Idle,
    /// EI executed in the current step.
    Requested,
    /// The step after EI is running; IME is set when it ends.
    Enabling,
}

impl Cpu {
    /// Advance a pending EI. Runs at the end of every executed instruction.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        self.ime_schedule = match self.ime_schedule {
            ImeSchedule::Idle => ImeSchedule::Idle,
            ImeSchedule::Requested => ImeSchedule::Enabling,
            ImeSchedule::Enabling => {
                self.ime = true;
                ImeSchedule::Idle
            }
        };
    }

    /// Drop any EI still in flight (DI, RETI, interrupt entry, reset).
    #[inline]
    pub(in crate::cpu) fn cancel_ime_schedule(&mut self) {
        self.ime_schedule = ImeSchedule::Idle;
    }

    /// Whether an EI is still waiting to take effect.
    #[inline]
    pub fn ime_enable_scheduled(&self) -> bool {
        self.ime_schedule != ImeSchedule::Idle
    }
}
