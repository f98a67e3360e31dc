use crate::cyk::CykChart;
use crate::derivation::Derivation;
use crate::earley::EarleyChart;

pub trait Rendered {
    fn rendered(&self) -> String;
}

impl Rendered for [char] {
    fn rendered(&self) -> String {
        self.iter().collect()
    }
}

impl Rendered for Derivation<'_> {
    fn rendered(&self) -> String {
        format!("{}", self)
    }
}

impl Rendered for CykChart<'_> {
    fn rendered(&self) -> String {
        format!("{}", self.levels())
    }
}

impl Rendered for EarleyChart<'_> {
    fn rendered(&self) -> String {
        format!("{}", self.sets())
    }
}

impl<T: Rendered> Rendered for Option<T> {
    fn rendered(&self) -> String {
        match self {
            Some(t) => t.rendered(),
            None => "nil".to_string(),
        }
    }
}

impl<T: Rendered + ?Sized> Rendered for &T {
    fn rendered(&self) -> String {
        (**self).rendered()
    }
}
