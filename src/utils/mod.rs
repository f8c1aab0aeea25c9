mod rc;

pub use rc::Rc;
