pub mod formation_record;
