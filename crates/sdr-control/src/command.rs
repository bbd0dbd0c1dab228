/// What the decoder is asked to do. The discriminants are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(i32)]
pub enum Command {
    #[display("start")]
    Start = 0,
    #[display("stop")]
    Stop = 1,
    #[display("record")]
    Record = 2,
    #[display("store")]
    Store = 3,
    #[display("clear")]
    Clear = 4,
}

impl Command {
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::Stop,
        Self::Record,
        Self::Store,
        Self::Clear,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown decoder command code {0}")]
pub struct CommandError(pub i32);

impl TryFrom<i32> for Command {
    type Error = CommandError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Start),
            1 => Ok(Self::Stop),
            2 => Ok(Self::Record),
            3 => Ok(Self::Store),
            4 => Ok(Self::Clear),
            other => Err(CommandError(other)),
        }
    }
}

impl From<Command> for i32 {
    fn from(command: Command) -> Self {
        command.code()
    }
}
